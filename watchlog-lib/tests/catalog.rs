use std::cell::Cell;
use std::rc::Rc;

use watchlog_db::{InsertedIds, SeasonIds};
use watchlog_lib::*;

fn pulp_fiction() -> Media {
    Media::movie(
        "Pulp Fiction",
        "Crime",
        1994,
        154,
        vec!["John Travolta".to_string(), "Uma Thurman".to_string()],
    )
    .unwrap()
}

fn breaking_bad() -> Media {
    let mut series = Media::series(
        "Breaking Bad",
        "Drama",
        2008,
        vec!["Bryan Cranston".to_string()],
    )
    .unwrap();
    let mut s1 = Season::new(1, "").unwrap();
    s1.add_episode(Episode::new(1, "Pilot", 58).unwrap()).unwrap();
    series.add_season(s1).unwrap();
    series
}

fn memory_catalog() -> Catalog {
    Catalog::open(SqliteStore::open_memory().unwrap()).unwrap()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn pending_movie_statistics() {
    let mut catalog = memory_catalog();
    catalog.add(pulp_fiction()).unwrap();

    let stats = catalog.statistics();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.movies, 1);
    assert_eq!(stats.status_count(ViewingStatus::Pending), 1);
    assert_eq!(stats.average_rating, 0.0);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["filmes"], 1);
    assert_eq!(json["series"], 0);
    assert_eq!(json["status"]["PENDENTE"], 1);
    assert_eq!(json["status"]["CONCLUIDO"], 0);
    assert_eq!(json["media_avaliacao"], 0.0);
    assert_eq!(json["total_horas_assistidas"], 0.0);
    assert_eq!(json["generos"]["Crime"]["filmes"], 1);
    assert!(json["top10_filmes"].as_array().unwrap().is_empty());
}

#[test]
fn finished_series_statistics() {
    let mut catalog = memory_catalog();
    let id = catalog.add(breaking_bad()).unwrap();

    let outcome = catalog
        .set_viewing(id, Some(ViewingStatus::Done), Some(9.5))
        .unwrap();
    assert_eq!(outcome, Some(RatingOutcome::Applied(9.5)));

    let stats = catalog.statistics();
    assert_eq!(stats.watched_hours, 1.0);
    assert_eq!(stats.average_rating, 9.5);
    assert_eq!(stats.top_series.len(), 1);
    assert_eq!(stats.top_series[0].title(), "Breaking Bad");

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_horas_assistidas"], 1.0);
    assert_eq!(json["top10_series"][0]["title"], "Breaking Bad");
    assert_eq!(json["top10_series"][0]["seasons"][0]["episodes"][0]["title"], "Pilot");
}

// ── Mirror consistency ──────────────────────────────────────────────────────

#[test]
fn changes_survive_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");

    let mut catalog = Catalog::open_path(&path).unwrap();
    let movie_id = catalog.add(pulp_fiction()).unwrap();
    let series_id = catalog.add(breaking_bad()).unwrap();
    catalog
        .set_viewing(movie_id, Some(ViewingStatus::Done), Some(8.0))
        .unwrap();
    catalog
        .append_episode(series_id, 1, Episode::new(2, "Cat's in the Bag...", 48).unwrap())
        .unwrap();
    let mut snapshot = catalog.media().to_vec();
    catalog.close().unwrap();

    let reopened = Catalog::open_path(&path).unwrap();
    // Reloaded in title order.
    snapshot.sort_by(|a, b| a.title().cmp(b.title()));
    assert_eq!(reopened.media(), snapshot.as_slice());
    assert_eq!(reopened.find(movie_id).unwrap().rating(), 8.0);
    assert_eq!(reopened.find_series(series_id).unwrap().episode_count(), 2);
}

#[test]
fn load_orders_by_title_and_additions_append() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("catalog.db");

    let mut catalog = Catalog::open_path(&path).unwrap();
    catalog.add(pulp_fiction()).unwrap();
    catalog.add(breaking_bad()).unwrap();
    let titles: Vec<&str> = catalog.media().iter().map(|m| m.title()).collect();
    assert_eq!(titles, ["Pulp Fiction", "Breaking Bad"]);

    catalog.reload().unwrap();
    let titles: Vec<&str> = catalog.media().iter().map(|m| m.title()).collect();
    assert_eq!(titles, ["Breaking Bad", "Pulp Fiction"]);
}

#[test]
fn update_writes_status_and_rating() {
    let mut catalog = memory_catalog();
    let id = catalog.add(pulp_fiction()).unwrap();

    let mut edited = catalog.find(id).unwrap().clone();
    edited.set_status(ViewingStatus::Done);
    edited.set_rating(7.5).unwrap();
    catalog.update(&edited).unwrap();

    assert_eq!(catalog.find(id).unwrap().rating(), 7.5);
    catalog.reload().unwrap();
    assert_eq!(catalog.find(id).unwrap().status(), ViewingStatus::Done);
    assert_eq!(catalog.find(id).unwrap().rating(), 7.5);
}

#[test]
fn update_of_unknown_entry_is_not_found() {
    let mut catalog = memory_catalog();
    let err = catalog.update(&pulp_fiction()).unwrap_err();
    assert!(err.is_not_found());

    let err = catalog.update(&pulp_fiction().with_id(42)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn rating_on_unfinished_entry_is_reset() {
    let mut catalog = memory_catalog();
    let id = catalog.add(pulp_fiction()).unwrap();

    let outcome = catalog
        .set_viewing(id, Some(ViewingStatus::Watching), Some(9.0))
        .unwrap();
    assert_eq!(outcome, Some(RatingOutcome::ResetNotDone { requested: 9.0 }));
    assert_eq!(catalog.find(id).unwrap().rating(), 0.0);
    assert_eq!(catalog.find(id).unwrap().status(), ViewingStatus::Watching);
}

#[test]
fn rating_is_clamped_when_done() {
    let mut catalog = memory_catalog();
    let id = catalog.add(pulp_fiction()).unwrap();
    catalog
        .set_viewing(id, Some(ViewingStatus::Done), Some(14.0))
        .unwrap();
    assert_eq!(catalog.find(id).unwrap().rating(), 10.0);

    // Leaving Done drops the rating.
    catalog
        .set_viewing(id, Some(ViewingStatus::Abandoned), None)
        .unwrap();
    assert_eq!(catalog.find(id).unwrap().rating(), 0.0);
}

#[test]
fn remove_deletes_entry_and_children() {
    let mut catalog = memory_catalog();
    let series_id = catalog.add(breaking_bad()).unwrap();
    let movie_id = catalog.add(pulp_fiction()).unwrap();

    let removed = catalog.remove(series_id, MediaKind::Series).unwrap();
    assert_eq!(removed.title(), "Breaking Bad");
    assert_eq!(catalog.len(), 1);

    let counts = catalog.store().row_counts().unwrap();
    assert_eq!((counts.media, counts.seasons, counts.episodes), (1, 0, 0));

    catalog.remove(movie_id, MediaKind::Movie).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn remove_with_wrong_kind_keeps_entry() {
    let mut catalog = memory_catalog();
    let id = catalog.add(pulp_fiction()).unwrap();

    let err = catalog.remove(id, MediaKind::Series).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(catalog.len(), 1);
    assert!(catalog.remove(999, MediaKind::Movie).unwrap_err().is_not_found());
}

#[test]
fn by_status_keeps_catalog_order() {
    let mut catalog = memory_catalog();
    let a = catalog.add(pulp_fiction()).unwrap();
    catalog.add(breaking_bad()).unwrap();
    let c = catalog
        .add(Media::movie("Heat", "Crime", 1995, 170, vec![]).unwrap())
        .unwrap();
    catalog.set_viewing(a, Some(ViewingStatus::Done), None).unwrap();
    catalog.set_viewing(c, Some(ViewingStatus::Done), None).unwrap();

    let done: Vec<&str> = catalog
        .by_status(ViewingStatus::Done)
        .iter()
        .map(|m| m.title())
        .collect();
    assert_eq!(done, ["Pulp Fiction", "Heat"]);
    assert_eq!(catalog.by_status(ViewingStatus::Pending).len(), 1);
    assert!(catalog.by_status(ViewingStatus::Abandoned).is_empty());
}

#[test]
fn find_series_ignores_movies() {
    let mut catalog = memory_catalog();
    let movie_id = catalog.add(pulp_fiction()).unwrap();
    let series_id = catalog.add(breaking_bad()).unwrap();

    assert!(catalog.find(movie_id).is_some());
    assert!(catalog.find_series(movie_id).is_none());
    assert!(catalog.find_series(series_id).is_some());
}

#[test]
fn find_duplicate_matches_title_year_and_kind() {
    let mut catalog = memory_catalog();
    catalog.add(pulp_fiction()).unwrap();

    let again = Media::movie("Pulp Fiction", "Thriller", 1994, 150, vec![]).unwrap();
    assert!(catalog.find_duplicate(&again).is_some());
    let remake = Media::movie("Pulp Fiction", "Crime", 2020, 150, vec![]).unwrap();
    assert!(catalog.find_duplicate(&remake).is_none());
    let show = Media::series("Pulp Fiction", "Crime", 1994, vec![]).unwrap();
    assert!(catalog.find_duplicate(&show).is_none());
}

#[test]
fn add_season_to_series() {
    let mut catalog = memory_catalog();
    let id = catalog.add(breaking_bad()).unwrap();

    let mut s2 = Season::new(2, "").unwrap();
    s2.add_episode(Episode::new(1, "Seven Thirty-Seven", 47).unwrap())
        .unwrap();
    let season_id = catalog.add_season(id, s2).unwrap();

    let series = catalog.find_series(id).unwrap();
    assert_eq!(series.seasons().len(), 2);
    assert_eq!(series.season(2).unwrap().id(), Identity::Saved(season_id));
    assert!(series.season(2).unwrap().episodes()[0].id().is_saved());

    let err = catalog.add_season(id, Season::new(1, "").unwrap()).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::DuplicateSeason(1))
    ));
}

#[test]
fn append_episode_to_missing_season_is_not_found() {
    let mut catalog = memory_catalog();
    let id = catalog.add(breaking_bad()).unwrap();

    let err = catalog
        .append_episode(id, 3, Episode::new(1, "", 45).unwrap())
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(catalog.store().row_counts().unwrap().episodes, 1);

    let movie_id = catalog.add(pulp_fiction()).unwrap();
    let err = catalog
        .append_episode(movie_id, 1, Episode::new(1, "", 45).unwrap())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn append_duplicate_episode_is_rejected() {
    let mut catalog = memory_catalog();
    let id = catalog.add(breaking_bad()).unwrap();

    let err = catalog
        .append_episode(id, 1, Episode::new(1, "Pilot again", 58).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::DuplicateEpisode(1))
    ));
    assert_eq!(catalog.find_series(id).unwrap().episode_count(), 1);
}

#[test]
fn adding_saved_media_is_refused() {
    let mut catalog = memory_catalog();
    let err = catalog.add(pulp_fiction().with_id(7)).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Store(StoreError::AlreadyPersisted(_))
    ));
    assert!(catalog.is_empty());
}

// ── Failing store ───────────────────────────────────────────────────────────

/// Delegates to an in-memory SQLite store until the shared switch is off.
#[derive(Debug)]
struct FlakyStore {
    inner: SqliteStore,
    online: Rc<Cell<bool>>,
}

impl FlakyStore {
    fn new() -> (Self, Rc<Cell<bool>>) {
        let online = Rc::new(Cell::new(true));
        let store = Self {
            inner: SqliteStore::open_memory().unwrap(),
            online: Rc::clone(&online),
        };
        (store, online)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.online.get() {
            Ok(())
        } else {
            Err(StoreError::Unavailable("simulated outage".to_string()))
        }
    }
}

impl MediaStore for FlakyStore {
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.check()?;
        self.inner.initialize_schema()
    }

    fn load_all(&self) -> Result<Vec<Media>, StoreError> {
        self.check()?;
        self.inner.load_all()
    }

    fn insert_rows(&mut self, media: &Media) -> Result<InsertedIds, StoreError> {
        self.check()?;
        self.inner.insert_rows(media)
    }

    fn insert_season_rows(
        &mut self,
        media_id: i64,
        season: &Season,
    ) -> Result<SeasonIds, StoreError> {
        self.check()?;
        self.inner.insert_season_rows(media_id, season)
    }

    fn insert_episode_row(&mut self, season_id: i64, episode: &Episode) -> Result<i64, StoreError> {
        self.check()?;
        self.inner.insert_episode_row(season_id, episode)
    }

    fn update(&mut self, media: &Media) -> Result<(), StoreError> {
        self.check()?;
        self.inner.update(media)
    }

    fn delete(&mut self, media_id: i64, kind: MediaKind) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(media_id, kind)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.inner.close()
    }
}

#[test]
fn unreachable_store_fails_open() {
    let (store, online) = FlakyStore::new();
    online.set(false);
    assert!(Catalog::open(store).unwrap_err().is_unavailable());
}

#[test]
fn failed_writes_leave_memory_untouched() {
    let (store, online) = FlakyStore::new();
    let mut catalog = Catalog::open(store).unwrap();
    let series_id = catalog.add(breaking_bad()).unwrap();
    let movie_id = catalog.add(pulp_fiction()).unwrap();
    let before = catalog.media().to_vec();

    online.set(false);

    let err = catalog.add(pulp_fiction()).unwrap_err();
    assert!(err.is_unavailable());
    let err = catalog
        .set_viewing(movie_id, Some(ViewingStatus::Done), Some(9.0))
        .unwrap_err();
    assert!(err.is_unavailable());
    let err = catalog.remove(series_id, MediaKind::Series).unwrap_err();
    assert!(err.is_unavailable());
    let err = catalog
        .add_season(series_id, Season::new(2, "").unwrap())
        .unwrap_err();
    assert!(err.is_unavailable());
    let err = catalog
        .append_episode(series_id, 1, Episode::new(2, "", 48).unwrap())
        .unwrap_err();
    assert!(err.is_unavailable());

    assert_eq!(catalog.media(), before.as_slice());

    // Back online, the store agrees with the untouched mirror.
    online.set(true);
    catalog.reload().unwrap();
    let mut reloaded = catalog.media().to_vec();
    let mut expected = before;
    reloaded.sort_by_key(|m| m.id().id());
    expected.sort_by_key(|m| m.id().id());
    assert_eq!(reloaded, expected);
}

#[test]
fn closed_store_reports_unavailable() {
    let mut store = SqliteStore::open_memory().unwrap();
    store.close().unwrap();
    let err = Catalog::open(store).unwrap_err();
    assert!(err.is_unavailable());
}
