//! Style source configuration.
//!
//! The style rows live in a JSON file shipped with the game. Its location can
//! be overridden through the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::error::GridError;
use crate::game::style::StyleRow;

/// Environment variable overriding the style source path.
pub const STYLE_PATH_ENV: &str = "TACTICS_GRID_STYLES";

/// Style source used when the environment does not name one.
pub const DEFAULT_STYLE_PATH: &str = "assets/grid_styles.json";

pub fn style_source_path() -> PathBuf {
    env::var_os(STYLE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STYLE_PATH))
}

/// Reads the JSON array of style rows at `path`.
pub fn read_style_rows(path: &Path) -> Result<Vec<StyleRow>, GridError> {
    if !path.exists() {
        return Err(GridError::StyleSourceMissing {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| GridError::StyleSourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| GridError::StyleSourceParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{ActivityType, CellKind};
    use std::io::Write;

    #[test]
    fn test_read_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"kind":"Deployable","activity":"Hover","style":{{"color":[0,200,0,255],"glyph":"+"}}}}]"#
        )
        .unwrap();

        let rows = read_style_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, CellKind::Deployable);
        assert_eq!(rows[0].activity, ActivityType::Hover);
        assert_eq!(rows[0].style.glyph, '+');
        assert!(!rows[0].style.outline);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            read_style_rows(&path),
            Err(GridError::StyleSourceMissing { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            read_style_rows(file.path()),
            Err(GridError::StyleSourceParse { .. })
        ));
    }

    #[test]
    fn test_shipped_style_source_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_STYLE_PATH);
        let rows = read_style_rows(&path).unwrap();
        assert!(!rows.is_empty());
    }
}
