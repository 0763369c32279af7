//! Favorites persisted through the file medium, across store instances.

use flicklist::favorites::{FavoritesStore, SharedFavorites};
use flicklist::storage::{FileStorage, Storage, STORAGE_KEY};
use flicklist::worker::{FavoritesWorker, WorkerMessage, WorkerResponse};
use flicklist::{initialize, Config, Event, Movie};
use std::fs;
use std::path::Path;

fn open(dir: &Path) -> FavoritesStore<FileStorage> {
    FavoritesStore::new(FileStorage::new(dir.to_path_buf()).unwrap())
}

fn ids(movies: &[Movie]) -> Vec<i64> {
    movies.iter().map(|m| m.id).collect()
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open(dir.path());
    store.hydrate();
    store.add(Movie::new(3, "Heat"));
    store.add(Movie::new(1, "Alien"));
    store.add(Movie::new(2, "Ronin"));
    store.remove(1);
    drop(store);

    let mut reopened = open(dir.path());
    assert_eq!(reopened.hydrate(), 2);
    assert_eq!(ids(&reopened.list()), vec![3, 2]);
}

#[test]
fn record_is_a_json_array_of_movies() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    store.hydrate();
    store.add(Movie::new(550, "Fight Club"));

    let raw = fs::read_to_string(dir.path().join(format!("{STORAGE_KEY}.json"))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], 550);
    assert_eq!(value[0]["title"], "Fight Club");
    assert!(!dir.path().join(format!("{STORAGE_KEY}.json.tmp")).exists());
}

#[test]
fn malformed_record_starts_empty_and_is_replaced_on_next_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{STORAGE_KEY}.json"));
    fs::write(&path, "{ not json").unwrap();

    let mut store = open(dir.path());
    assert_eq!(store.hydrate(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

    store.add(Movie::new(9, "Se7en"));
    let mut reopened = open(dir.path());
    reopened.hydrate();
    assert_eq!(ids(&reopened.list()), vec![9]);
}

#[test]
fn early_mutations_do_not_clobber_the_persisted_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = open(dir.path());
    first.hydrate();
    first.add_many(vec![Movie::new(1, "Alien"), Movie::new(2, "Aliens")]);

    let mut second = open(dir.path());
    second.add(Movie::new(3, "Alien 3"));
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    let raw = storage.read(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("Aliens"));
    assert!(!raw.contains("Alien 3"));

    assert_eq!(second.hydrate(), 3);
    assert_eq!(ids(&second.list()), vec![1, 2, 3]);
}

#[test]
fn shared_handle_and_worker_agree_on_disk_state() {
    let dir = tempfile::tempdir().unwrap();

    let shared = SharedFavorites::new(open(dir.path()));
    shared.hydrate().unwrap();
    shared.add(Movie::new(10, "Brazil")).unwrap();

    let worker = FavoritesWorker::spawn(open(dir.path())).unwrap();
    assert_eq!(
        worker.request(WorkerMessage::hydrate()).unwrap(),
        WorkerResponse::Hydrated { count: 1 }
    );
    assert_eq!(
        worker.request(WorkerMessage::add(Movie::new(11, "Tron"))).unwrap(),
        WorkerResponse::Updated { changed: true, count: 2 }
    );
    worker.shutdown().unwrap();

    let mut reopened = open(dir.path());
    reopened.hydrate();
    assert_eq!(ids(&reopened.list()), vec![10, 11]);
}

#[test]
fn initialized_app_persists_toggles() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };

    let mut state = initialize(&config);
    flicklist::handle_event(&mut state, &Event::HydrateFavorites);
    flicklist::handle_event(&mut state, &Event::ToggleFavorite(Movie::new(42, "Hackers")));
    drop(state);

    let mut reopened = open(dir.path());
    reopened.hydrate();
    assert_eq!(ids(&reopened.list()), vec![42]);
}
