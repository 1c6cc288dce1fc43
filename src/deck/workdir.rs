use super::DeckSet;
use super::error::Error;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

pub const COLLAPSE_FILE: &str = "COLL.inp";
pub const MAIN_FILE: &str = "inp.5";

/// `<path>_bk_<YYYYmmddHHMMSS>` for the given instant.
pub fn backup_name(path: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!("_bk_{}", at.format("%Y%m%d%H%M%S")));
    PathBuf::from(name)
}

/// Moves an existing file or directory at `path` out of the way.
///
/// Returns the backup location, or `None` when nothing was there.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>, Error> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_name(path, Local::now());
    fs::rename(path, &backup).map_err(|e| Error::workdir(path, e))?;
    log::info!("Backing up existing {} as {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Creates an empty directory at `path`, backing up whatever was there.
pub fn fresh_dir(path: &Path) -> Result<Option<PathBuf>, Error> {
    let backup = backup_existing(path)?;
    fs::create_dir_all(path).map_err(|e| Error::workdir(path, e))?;
    Ok(backup)
}

/// Writes the decks of one cell into `<root>/<cell>/` and returns that directory.
pub fn write_deck_set(root: &Path, set: &DeckSet) -> Result<PathBuf, Error> {
    let dir = root.join(set.cell.to_string());
    fresh_dir(&dir)?;
    for (name, text) in [(COLLAPSE_FILE, &set.collapse), (MAIN_FILE, &set.main)] {
        let file = dir.join(name);
        fs::write(&file, text).map_err(|e| Error::workdir(&file, e))?;
    }
    log::debug!("Wrote decks of cell {} to {}", set.cell, dir.display());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deck_set(cell: u32) -> DeckSet {
        DeckSet {
            cell,
            collapse: "12 12\n".to_string(),
            main: "title\n".to_string(),
            scenario: String::new(),
            isotopes: Vec::new(),
            feeds: None,
        }
    }

    #[test]
    fn backup_name_appends_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            backup_name(Path::new("runs/120"), at),
            PathBuf::from("runs/120_bk_20240309070501")
        );
    }

    #[test]
    fn deck_set_lands_in_cell_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = write_deck_set(root.path(), &deck_set(42)).unwrap();
        assert_eq!(dir, root.path().join("42"));
        assert_eq!(fs::read_to_string(dir.join(COLLAPSE_FILE)).unwrap(), "12 12\n");
        assert_eq!(fs::read_to_string(dir.join(MAIN_FILE)).unwrap(), "title\n");
    }

    #[test]
    fn existing_directory_is_backed_up() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("7");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("old.txt"), "keep me").unwrap();

        let backup = fresh_dir(&dir).unwrap().expect("backup created");
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        assert_eq!(fs::read_to_string(backup.join("old.txt")).unwrap(), "keep me");
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("7_bk_"));
        assert_eq!(name.len(), "7_bk_".len() + 14);
    }

    #[test]
    fn missing_path_needs_no_backup() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(backup_existing(&root.path().join("none")).unwrap(), None);
    }
}
