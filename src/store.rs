use crate::dates;
use crate::error::AppError;
use crate::models::rankings::{
    DayRecord, GameDay, ImmunityDocument, ImmunityEntry, PlayerPoints, RankEntry, RankingsDocument,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

const RANKINGS_DOC: &str = "game-rankings.json";
const IMMUNITY_DOC: &str = "immunity-points.json";

pub trait DocumentStore: Send {
    fn get(&mut self, name: &str) -> Result<Option<String>, AppError>;
    fn put(&mut self, name: &str, contents: &str) -> Result<(), AppError>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl DocumentStore for FileStore {
    fn get(&mut self, name: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, name: &str, contents: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), contents)?;
        Ok(())
    }
}

pub struct MemoryStore {
    docs: HashMap<String, String>,
}

impl DocumentStore for MemoryStore {
    fn get(&mut self, name: &str) -> Result<Option<String>, AppError> {
        Ok(self.docs.get(name).cloned())
    }

    fn put(&mut self, name: &str, contents: &str) -> Result<(), AppError> {
        self.docs.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

pub struct Store {
    docs: Mutex<Box<dyn DocumentStore>>,
}

impl Store {
    pub fn open(dir: &str) -> Result<Self, AppError> {
        fs::create_dir_all(dir)?;
        Ok(Store {
            docs: Mutex::new(Box::new(FileStore { dir: dir.into() })),
        })
    }

    pub fn open_in_memory() -> Self {
        Store {
            docs: Mutex::new(Box::new(MemoryStore {
                docs: HashMap::new(),
            })),
        }
    }

    // Serializes every read-modify-write cycle within this process.
    fn with_docs<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut dyn DocumentStore) -> Result<T, AppError>,
    {
        let mut docs = self.docs.lock().unwrap();
        f(docs.as_mut())
    }

    pub fn store_days(&self, days: &[GameDay]) -> Result<Vec<String>, AppError> {
        self.with_docs(|docs| {
            let mut doc = load_rankings(docs)?;
            let mut stored = Vec::with_capacity(days.len());
            for day in days {
                let date = dates::canonical_date(&day.date).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid leaderboard date: {}", day.date))
                })?;
                let mut players = day.players.clone();
                players.sort_by_key(|p| p.rank);
                let ranks = players
                    .into_iter()
                    .map(|p| RankEntry {
                        rank: p.rank,
                        name: p.name,
                    })
                    .collect();
                doc.games.insert(
                    date.clone(),
                    DayRecord {
                        game: day.game.clone(),
                        ranks,
                    },
                );
                stored.push(date);
            }
            save_rankings(docs, &doc)?;
            Ok(stored)
        })
    }

    pub fn all_rankings(&self) -> Result<RankingsDocument, AppError> {
        self.with_docs(load_rankings)
    }

    pub fn rankings_in_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<BTreeMap<String, DayRecord>, AppError> {
        self.with_docs(|docs| {
            let doc = load_rankings(docs)?;
            Ok(doc
                .games
                .into_iter()
                .filter(|(date, _)| date.as_str() >= start && date.as_str() <= end)
                .collect())
        })
    }

    pub fn all_players(&self) -> Result<Vec<String>, AppError> {
        self.with_docs(|docs| {
            let doc = load_rankings(docs)?;
            let names: BTreeSet<String> = doc
                .games
                .into_values()
                .flat_map(|day| day.ranks.into_iter().map(|r| r.name))
                .collect();
            Ok(names.into_iter().collect())
        })
    }

    pub fn put_immunity_points(
        &self,
        date: &str,
        players: Vec<PlayerPoints>,
    ) -> Result<usize, AppError> {
        self.with_docs(|docs| {
            let mut doc = load_immunity(docs)?;
            let count = players.len();
            match doc.points.iter_mut().find(|entry| entry.date == date) {
                Some(entry) => entry.players = players,
                None => doc.points.push(ImmunityEntry {
                    date: date.to_string(),
                    players,
                }),
            }
            doc.points.sort_by(|a, b| a.date.cmp(&b.date));
            save_immunity(docs, &doc)?;
            Ok(count)
        })
    }

    pub fn immunity_points_in_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<ImmunityEntry>, AppError> {
        self.with_docs(|docs| {
            let doc = load_immunity(docs)?;
            Ok(doc
                .points
                .into_iter()
                .filter(|entry| entry.date.as_str() >= start && entry.date.as_str() <= end)
                .collect())
        })
    }
}

// Missing documents read as empty and are created on first write.
fn load_rankings(docs: &mut dyn DocumentStore) -> Result<RankingsDocument, AppError> {
    match docs.get(RANKINGS_DOC)? {
        Some(contents) => Ok(serde_json::from_str(&contents)?),
        None => Ok(RankingsDocument::default()),
    }
}

fn save_rankings(docs: &mut dyn DocumentStore, doc: &RankingsDocument) -> Result<(), AppError> {
    docs.put(RANKINGS_DOC, &serde_json::to_string_pretty(doc)?)
}

fn load_immunity(docs: &mut dyn DocumentStore) -> Result<ImmunityDocument, AppError> {
    match docs.get(IMMUNITY_DOC)? {
        Some(contents) => Ok(serde_json::from_str(&contents)?),
        None => Ok(ImmunityDocument::default()),
    }
}

fn save_immunity(docs: &mut dyn DocumentStore, doc: &ImmunityDocument) -> Result<(), AppError> {
    docs.put(IMMUNITY_DOC, &serde_json::to_string_pretty(doc)?)
}
