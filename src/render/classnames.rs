//! Class vocabulary attached to rendered views.
//!
//! Surfaces style by class name, never by peeking at picker internals. The
//! defaults form a BEM-flavored `tagbox` vocabulary; any subset can be
//! overridden from a TOML file named in the config, with unlisted entries
//! keeping their defaults.
//!
//! # Example override file
//!
//! ```toml
//! container = "picker"
//! choice_highlighted = "picker__choice is-highlighted"
//! ```

use crate::domain::error::{PickerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class names for every rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub container: String,
    pub input: String,
    pub list: String,
    pub list_items: String,
    pub list_dropdown: String,
    pub item: String,
    pub item_selected: String,
    pub item_disabled: String,
    pub choice: String,
    pub choice_disabled: String,
    pub choice_highlighted: String,
    pub group: String,
    pub group_heading: String,
    pub notice: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "tagbox".to_string(),
            input: "tagbox__input".to_string(),
            list: "tagbox__list".to_string(),
            list_items: "tagbox__list--items".to_string(),
            list_dropdown: "tagbox__list--dropdown".to_string(),
            item: "tagbox__item".to_string(),
            item_selected: "tagbox__item--selected".to_string(),
            item_disabled: "tagbox__item--disabled".to_string(),
            choice: "tagbox__choice".to_string(),
            choice_disabled: "tagbox__choice--disabled".to_string(),
            choice_highlighted: "tagbox__choice--highlighted".to_string(),
            group: "tagbox__group".to_string(),
            group_heading: "tagbox__group-heading".to_string(),
            notice: "tagbox__notice".to_string(),
        }
    }
}

impl ClassNames {
    /// Loads overrides from a TOML file, falling back to defaults for any
    /// entry the file leaves out.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Io`] when the file cannot be read and
    /// [`PickerError::Skin`] when it is not valid TOML for this shape.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| {
            PickerError::Skin(format!("failed to parse {}: {err}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_use_the_tagbox_vocabulary() {
        let classes = ClassNames::default();
        assert_eq!(classes.container, "tagbox");
        assert_eq!(classes.choice_highlighted, "tagbox__choice--highlighted");
        assert_eq!(classes.group_heading, "tagbox__group-heading");
    }

    #[test]
    fn partial_files_keep_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "container = \"picker\"").unwrap();
        writeln!(file, "item = \"picker__tag\"").unwrap();

        let classes = ClassNames::from_file(&path).unwrap();

        assert_eq!(classes.container, "picker");
        assert_eq!(classes.item, "picker__tag");
        assert_eq!(classes.input, "tagbox__input");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ClassNames::from_file("/nonexistent/skin.toml").unwrap_err();
        assert!(matches!(err, PickerError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_a_skin_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.toml");
        fs::write(&path, "container = [nope").unwrap();

        let err = ClassNames::from_file(&path).unwrap_err();
        assert!(matches!(err, PickerError::Skin(_)));
    }
}
