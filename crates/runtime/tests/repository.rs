use armies_core::{GameState, World, WorldType};
use armies_runtime::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, StateFormat, StateRepository,
};

fn state(width: i32) -> GameState {
    GameState::new(World::new(width, 3, WorldType::Tactic))
}

fn exercise(repository: &dyn StateRepository) {
    assert!(repository.list_slots().unwrap().is_empty());
    assert_eq!(repository.load("first").unwrap(), None);

    repository.save("second", &state(2)).unwrap();
    repository.save("first", &state(4)).unwrap();
    repository.save("first", &state(5)).unwrap();

    assert!(repository.exists("first"));
    assert_eq!(repository.list_slots().unwrap(), vec!["first", "second"]);
    assert_eq!(repository.load("first").unwrap(), Some(state(5)));

    repository.delete("first").unwrap();
    repository.delete("first").unwrap();
    assert!(!repository.exists("first"));
    assert_eq!(repository.list_slots().unwrap(), vec!["second"]);

    for slot in ["", "a/b", "..", "name with spaces"] {
        assert!(
            matches!(
                repository.save(slot, &state(1)),
                Err(RepositoryError::InvalidSlot(_))
            ),
            "{slot:?}"
        );
    }
}

#[test]
fn in_memory_repository_keeps_slots() {
    exercise(&InMemoryStateRepo::new());
}

#[test]
fn file_repository_keeps_slots() {
    for format in [StateFormat::Json, StateFormat::Bincode] {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileStateRepository::new(dir.path().join("saves"), format).unwrap();
        exercise(&repository);

        let files: Vec<String> = std::fs::read_dir(repository.base_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec![format!("second.{}", format.extension())]);
    }
}

#[test]
fn corrupted_saves_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), b"{ not json").unwrap();
    let repository = FileStateRepository::new(dir.path(), StateFormat::Json).unwrap();
    assert!(matches!(
        repository.load("broken"),
        Err(RepositoryError::Json(_))
    ));
}

#[test]
fn formats_parse_from_names() {
    assert_eq!("JSON".parse::<StateFormat>(), Ok(StateFormat::Json));
    assert_eq!("bincode".parse::<StateFormat>(), Ok(StateFormat::Bincode));
    assert!("yaml".parse::<StateFormat>().is_err());
}
