use phf::{Set, phf_set};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Template keys, named exactly as they appear in project templates.
pub mod keys {
    pub const MOLECULE_FILE: &str = "molecule_file";
    pub const PARTS: &str = "parts";
    pub const DEFORMATIONS: &str = "deformations";
    pub const PROJECT_NAME: &str = "project_name";
    pub const PROJECT_FOLDER: &str = "project_folder";
    pub const SPECTRUM_FILE: &str = "spectrum_file";
    pub const LEFT_INTERVAL: &str = "left_interval";
    pub const RIGHT_INTERVAL: &str = "right_interval";
    pub const ENERGY_RANGE: &str = "energy_range";
    pub const GREEN: &str = "Green";
    pub const RADIUS: &str = "Radius";
    pub const GAMMA_HOLE: &str = "GH";
    pub const ECENT: &str = "Ecent";
    pub const ELARG: &str = "Elarg";
    pub const GMAX: &str = "Gmax";
    pub const EFERMI: &str = "Efermi";
    pub const SHIFT: &str = "shift";
    pub const NORM: &str = "norm";
}

/// Every key a project template may reference.
pub static TEMPLATE_KEYS: Set<&'static str> = phf_set! {
    "molecule_file", "parts", "deformations", "project_name", "project_folder",
    "spectrum_file", "left_interval", "right_interval", "energy_range", "Green",
    "Radius", "GH", "Ecent", "Elarg", "Gmax", "Efermi", "shift", "norm",
};

/// Keys whose value must parse as a floating point number.
pub static NUMERIC_KEYS: Set<&'static str> = phf_set! {
    "left_interval", "right_interval", "Radius", "GH", "Ecent", "Elarg", "Gmax", "Efermi",
    "shift", "norm",
};

/// Keys the template places inside single-quoted Python string literals.
pub static QUOTED_KEYS: Set<&'static str> = phf_set! {
    "molecule_file", "parts", "project_name", "project_folder", "spectrum_file", "energy_range",
};

pub const NO_DIRECTORY_CHOSEN: &str = "No directory chosen!";
pub const NO_MOLECULE_FILE_CHOSEN: &str = "No molecule file chosen!";
pub const NO_SPECTRUM_FILE_CHOSEN: &str = "No spectrum file chosen!";

/// Values a form shows in file and directory fields before anything has been picked.
pub static PLACEHOLDER_VALUES: Set<&'static str> = phf_set! {
    "No directory chosen!",
    "No molecule file chosen!",
    "No spectrum file chosen!",
};

pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_VALUES.contains(value.trim())
}

/// The scalar fields of a project, carried as the text the user entered.
///
/// Values are rendered verbatim into the template; numeric and placeholder checks happen when a
/// project is rendered, not on assignment, so a half-filled form is representable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectParameters {
    #[serde(deserialize_with = "text_or_number")]
    pub molecule_file: String,
    /// Molecule partition, a list of `start-end` atom ranges such as `0-5,6-12,`.
    #[serde(deserialize_with = "text_or_number")]
    pub parts: String,
    #[serde(deserialize_with = "text_or_number")]
    pub project_folder: String,
    #[serde(deserialize_with = "text_or_number")]
    pub project_name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub spectrum_file: String,
    #[serde(deserialize_with = "text_or_number")]
    pub left_interval: String,
    #[serde(deserialize_with = "text_or_number")]
    pub right_interval: String,
    /// FDMNES energy range, `e0 step0 e1 step1 ...`.
    #[serde(deserialize_with = "text_or_number")]
    pub energy_range: String,
    /// Use the Green (muffin-tin) approximation.
    pub green: bool,
    #[serde(deserialize_with = "text_or_number")]
    pub radius: String,
    #[serde(deserialize_with = "text_or_number")]
    pub gamma_hole: String,
    #[serde(deserialize_with = "text_or_number")]
    pub ecent: String,
    #[serde(deserialize_with = "text_or_number")]
    pub elarg: String,
    #[serde(deserialize_with = "text_or_number")]
    pub gmax: String,
    #[serde(deserialize_with = "text_or_number")]
    pub efermi: String,
    #[serde(deserialize_with = "text_or_number")]
    pub shift: String,
    #[serde(deserialize_with = "text_or_number")]
    pub norm: String,
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self {
            molecule_file: NO_MOLECULE_FILE_CHOSEN.to_string(),
            parts: String::new(),
            project_folder: NO_DIRECTORY_CHOSEN.to_string(),
            project_name: String::new(),
            spectrum_file: NO_SPECTRUM_FILE_CHOSEN.to_string(),
            left_interval: String::new(),
            right_interval: String::new(),
            energy_range: String::new(),
            green: false,
            radius: String::new(),
            gamma_hole: String::new(),
            ecent: String::new(),
            elarg: String::new(),
            gmax: String::new(),
            efermi: String::new(),
            shift: String::new(),
            norm: String::new(),
        }
    }
}

impl ProjectParameters {
    /// Flattens the parameters and the generated deformation code into template values.
    pub fn to_context(&self, deformations: &str) -> BTreeMap<&'static str, String> {
        let green = if self.green { "True" } else { "False" };
        BTreeMap::from([
            (keys::MOLECULE_FILE, self.molecule_file.clone()),
            (keys::PARTS, self.parts.clone()),
            (keys::DEFORMATIONS, deformations.to_string()),
            (keys::PROJECT_NAME, self.project_name.clone()),
            (keys::PROJECT_FOLDER, self.project_folder.clone()),
            (keys::SPECTRUM_FILE, self.spectrum_file.clone()),
            (keys::LEFT_INTERVAL, self.left_interval.clone()),
            (keys::RIGHT_INTERVAL, self.right_interval.clone()),
            (keys::ENERGY_RANGE, self.energy_range.clone()),
            (keys::GREEN, green.to_string()),
            (keys::RADIUS, self.radius.clone()),
            (keys::GAMMA_HOLE, self.gamma_hole.clone()),
            (keys::ECENT, self.ecent.clone()),
            (keys::ELARG, self.elarg.clone()),
            (keys::GMAX, self.gmax.clone()),
            (keys::EFERMI, self.efermi.clone()),
            (keys::SHIFT, self.shift.clone()),
            (keys::NORM, self.norm.clone()),
        ])
    }

    /// Sets a field by its template key.
    ///
    /// Returns `false` for unknown keys and for `deformations`, which is generated.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match key {
            keys::MOLECULE_FILE => &mut self.molecule_file,
            keys::PARTS => &mut self.parts,
            keys::PROJECT_NAME => &mut self.project_name,
            keys::PROJECT_FOLDER => &mut self.project_folder,
            keys::SPECTRUM_FILE => &mut self.spectrum_file,
            keys::LEFT_INTERVAL => &mut self.left_interval,
            keys::RIGHT_INTERVAL => &mut self.right_interval,
            keys::ENERGY_RANGE => &mut self.energy_range,
            keys::GREEN => {
                return match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" => {
                        self.green = true;
                        true
                    }
                    "false" | "no" | "0" => {
                        self.green = false;
                        true
                    }
                    _ => false,
                };
            }
            keys::RADIUS => &mut self.radius,
            keys::GAMMA_HOLE => &mut self.gamma_hole,
            keys::ECENT => &mut self.ecent,
            keys::ELARG => &mut self.elarg,
            keys::GMAX => &mut self.gmax,
            keys::EFERMI => &mut self.efermi,
            keys::SHIFT => &mut self.shift,
            keys::NORM => &mut self.norm,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Parses a molecule partition such as `0-5,6-12,` into inclusive atom ranges.
pub fn parse_partition(text: &str) -> Result<Vec<(u32, u32)>, String> {
    let mut ranges = Vec::new();
    let trimmed = text.trim();
    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if body.is_empty() {
        return Err("must list at least one 'start-end' range".to_string());
    }

    for item in body.split(',') {
        let item = item.trim();
        let (start, end) = item
            .split_once('-')
            .ok_or_else(|| format!("range '{item}' is not of the form 'start-end'"))?;
        let parse = |s: &str| {
            s.trim()
                .parse::<u32>()
                .map_err(|_| format!("range '{item}' must contain non-negative integers"))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        if start > end {
            return Err(format!("range '{item}' starts after it ends"));
        }
        ranges.push((start, end));
    }
    Ok(ranges)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(i) => i.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    })
}
