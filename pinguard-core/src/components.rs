// pinguard-core/src/components.rs
//! Date decomposition: the named digit strings a date contributes to PINs,
//! the single-date PIN templates, and fixed-width fragment extraction.
//!
//! The component catalog order is significant. Fragment lists follow it, and
//! the generator truncates oversized fragment lists to a prefix, so reordering
//! [`ComponentName::ALL`] changes which candidates survive truncation.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeSet;
use std::fmt;

use crate::date::CalendarDate;
use crate::pin::PinLength;

/// Every named component derivable from a date.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentName {
    /// Zero-padded day.
    D,
    /// Day without padding.
    DNz,
    M,
    MNz,
    /// Last two year digits.
    YY,
    YYYY,
    /// Century digits, e.g. `19`.
    YY1,
    /// Same value as `YY`; kept separate for templates that split the year.
    YY2,
    DRev,
    MRev,
    YYRev,
    YYYYRev,
    D1,
    D2,
    M1,
    M2,
    Y1,
    Y2,
    Y3,
    Y4,
    /// `YYYYMMDD` reversed.
    FullRev,
    /// Day written twice.
    DD,
    MD,
    DM,
    YMD,
    MDY,
    YYDD,
    DDYY,
}

impl ComponentName {
    pub const ALL: [ComponentName; 28] = [
        ComponentName::D,
        ComponentName::DNz,
        ComponentName::M,
        ComponentName::MNz,
        ComponentName::YY,
        ComponentName::YYYY,
        ComponentName::YY1,
        ComponentName::YY2,
        ComponentName::DRev,
        ComponentName::MRev,
        ComponentName::YYRev,
        ComponentName::YYYYRev,
        ComponentName::D1,
        ComponentName::D2,
        ComponentName::M1,
        ComponentName::M2,
        ComponentName::Y1,
        ComponentName::Y2,
        ComponentName::Y3,
        ComponentName::Y4,
        ComponentName::FullRev,
        ComponentName::DD,
        ComponentName::MD,
        ComponentName::DM,
        ComponentName::YMD,
        ComponentName::MDY,
        ComponentName::YYDD,
        ComponentName::DDYY,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComponentName::D => "D",
            ComponentName::DNz => "D_nz",
            ComponentName::M => "M",
            ComponentName::MNz => "M_nz",
            ComponentName::YY => "YY",
            ComponentName::YYYY => "YYYY",
            ComponentName::YY1 => "YY_1",
            ComponentName::YY2 => "YY_2",
            ComponentName::DRev => "D_rev",
            ComponentName::MRev => "M_rev",
            ComponentName::YYRev => "YY_rev",
            ComponentName::YYYYRev => "YYYY_rev",
            ComponentName::D1 => "D_1",
            ComponentName::D2 => "D_2",
            ComponentName::M1 => "M_1",
            ComponentName::M2 => "M_2",
            ComponentName::Y1 => "Y_1",
            ComponentName::Y2 => "Y_2",
            ComponentName::Y3 => "Y_3",
            ComponentName::Y4 => "Y_4",
            ComponentName::FullRev => "FULL_REV",
            ComponentName::DD => "DD",
            ComponentName::MD => "MD",
            ComponentName::DM => "DM",
            ComponentName::YMD => "YMD",
            ComponentName::MDY => "MDY",
            ComponentName::YYDD => "YYDD",
            ComponentName::DDYY => "DDYY",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

/// The full component catalog of one date, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSet {
    values: Vec<(ComponentName, String)>,
}

impl ComponentSet {
    pub fn from_date(date: &CalendarDate) -> Self {
        let d = format!("{:02}", date.day());
        let m = format!("{:02}", date.month());
        let yy = format!("{:02}", date.year() % 100);
        let yyyy = format!("{:04}", date.year());
        let digit = |s: &str, i: usize| s[i..i + 1].to_string();

        let values = ComponentName::ALL
            .into_iter()
            .map(|name| {
                let value = match name {
                    ComponentName::D => d.clone(),
                    ComponentName::DNz => date.day().to_string(),
                    ComponentName::M => m.clone(),
                    ComponentName::MNz => date.month().to_string(),
                    ComponentName::YY | ComponentName::YY2 => yy.clone(),
                    ComponentName::YYYY => yyyy.clone(),
                    ComponentName::YY1 => format!("{:02}", date.year() / 100),
                    ComponentName::DRev => reversed(&d),
                    ComponentName::MRev => reversed(&m),
                    ComponentName::YYRev => reversed(&yy),
                    ComponentName::YYYYRev => reversed(&yyyy),
                    ComponentName::D1 => digit(&d, 0),
                    ComponentName::D2 => digit(&d, 1),
                    ComponentName::M1 => digit(&m, 0),
                    ComponentName::M2 => digit(&m, 1),
                    ComponentName::Y1 => digit(&yyyy, 0),
                    ComponentName::Y2 => digit(&yyyy, 1),
                    ComponentName::Y3 => digit(&yyyy, 2),
                    ComponentName::Y4 => digit(&yyyy, 3),
                    ComponentName::FullRev => reversed(&format!("{}{}{}", yyyy, m, d)),
                    ComponentName::DD => format!("{}{}", d, d),
                    ComponentName::MD => format!("{}{}", m, d),
                    ComponentName::DM => format!("{}{}", d, m),
                    ComponentName::YMD => format!("{}{}{}", yy, m, d),
                    ComponentName::MDY => format!("{}{}{}", m, d, yy),
                    ComponentName::YYDD => format!("{}{}", yy, d),
                    ComponentName::DDYY => format!("{}{}", d, yy),
                };
                (name, value)
            })
            .collect();

        ComponentSet { values }
    }

    pub fn get(&self, name: ComponentName) -> &str {
        // The catalog is always fully populated and in `ALL` order.
        &self.values[name as usize].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentName, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Joins the named components into one string.
    pub fn join(&self, template: &[ComponentName]) -> String {
        template.iter().map(|name| self.get(*name)).collect()
    }

    /// Every fragment of exactly `width` characters: first the components whose
    /// whole value has that width, then every sliding window over longer
    /// components. Both passes follow catalog order; duplicates are kept.
    pub fn fragments_of_width(&self, width: usize) -> Vec<&str> {
        if width == 0 {
            return Vec::new();
        }

        let mut fragments: Vec<&str> = self
            .values
            .iter()
            .filter(|(_, value)| value.len() == width)
            .map(|(_, value)| value.as_str())
            .collect();

        for (_, value) in self.values.iter().filter(|(_, value)| value.len() > width) {
            fragments.extend((0..=value.len() - width).map(|start| &value[start..start + width]));
        }

        fragments
    }
}

use ComponentName::*;

static FOUR_DIGIT_TEMPLATES: &[&[ComponentName]] = &[
    &[D, M],
    &[M, D],
    &[YY, M],
    &[M, YY],
    &[YY, D],
    &[D, YY],
    &[YY1, YY2],
    &[D, D],
    &[M, M],
    &[DRev, MRev],
    &[YYRev, DRev],
    // Two digits only; never reaches four so it contributes nothing.
    &[YY],
];

static SIX_DIGIT_TEMPLATES: &[&[ComponentName]] = &[
    &[D, M, YY],
    &[M, D, YY],
    &[YY, M, D],
    &[D, YY, M],
    &[M, YY, D],
    &[YY, D, M],
    &[YYYY, D],
    &[YYYY, M],
    &[D, D, D],
    &[M, M, M],
    &[D, M, D],
    &[M, D, M],
    &[YMD],
    &[MDY],
    &[DD, YY],
    &[YY, DD],
    &[FullRev],
];

/// The single-date templates for a PIN length.
pub fn templates_for(length: PinLength) -> &'static [&'static [ComponentName]] {
    match length {
        PinLength::Four => FOUR_DIGIT_TEMPLATES,
        PinLength::Six => SIX_DIGIT_TEMPLATES,
    }
}

/// Every PIN a person would plausibly derive from `date` alone.
///
/// Each template whose joined value has exactly the PIN length is included
/// together with its reversal (except the already-reversed `FULL_REV`), plus
/// the day repetitions and day/month alternations.
pub fn extract_patterns(date: &CalendarDate, length: PinLength) -> BTreeSet<String> {
    let components = ComponentSet::from_date(date);
    let width = length.digits();
    let mut patterns = BTreeSet::new();

    for template in templates_for(length) {
        let pattern = components.join(template);
        if pattern.len() != width {
            continue;
        }
        if !template.contains(&FullRev) {
            patterns.insert(reversed(&pattern));
        }
        patterns.insert(pattern);
    }

    let d = components.get(D);
    let m = components.get(M);
    match length {
        PinLength::Four => {
            patterns.insert(d.repeat(2));
        }
        PinLength::Six => {
            patterns.insert(d.repeat(3));
            patterns.insert(format!("{m}{d}{m}"));
            patterns.insert(format!("{d}{m}{d}"));
        }
    }

    patterns
}
