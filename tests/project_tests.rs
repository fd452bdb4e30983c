use nc_scene::{NcError, PathMap};
use std::fs;

#[cfg(test)]
mod project_tests {
    use super::*;

    fn sample() -> PathMap {
        [("ABC123".to_string(), "data/abc123".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let map = sample();
        assert_eq!(map.get_path("ABC123").unwrap(), "data/abc123");
        assert_eq!(map.get_path("abc123").unwrap(), map.get_path("ABC123").unwrap());
    }

    #[test]
    fn test_unmapped_project_is_not_found() {
        let map = sample();
        match map.get_path("zzz999") {
            Err(NcError::ProjectNotFound(id)) => assert_eq!(id, "zzz999"),
            other => panic!("Expected ProjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pathmap.json");
        fs::write(&file, r#"{"Boxy": "/srv/boxy", "moldy": "/srv/moldy"}"#).unwrap();

        let map = PathMap::load(&file).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_path("boxy").unwrap(), "/srv/boxy");
        assert_eq!(map.get_path("MOLDY").unwrap(), "/srv/moldy");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PathMap::load(dir.path().join("absent.json")).is_err());
    }
}
