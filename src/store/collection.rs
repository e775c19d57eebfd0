//! An ordered, file-backed list of records with session ids

use std::path::{Path, PathBuf};

use tracing::debug;

use super::csv_io::{append_row, read_rows, write_rows};
use super::record::Record;
use crate::error::{Result, TrackerError};
use crate::models::RecordId;

/// Records in file order, each tagged with a [`RecordId`]
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    path: PathBuf,
    entries: Vec<(RecordId, T)>,
    next_id: u64,
}

impl<T: Record> Collection<T> {
    /// Read the collection's file from `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(T::FILE_NAME);
        let rows = read_rows(&path)?;
        let mut collection = Self {
            path,
            entries: Vec::new(),
            next_id: 1,
        };
        collection.replace_all(rows);
        Ok(collection)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file without touching the current entries
    pub(crate) fn read_file(&self) -> Result<Vec<T>> {
        read_rows(&self.path)
    }

    /// Swap in freshly read rows, keeping ids of records whose name survived
    pub(crate) fn replace_all(&mut self, rows: Vec<T>) {
        let mut previous = std::mem::take(&mut self.entries);
        let mut entries = Vec::with_capacity(rows.len());

        for row in rows {
            let id = match previous.iter().position(|(_, old)| old.key() == row.key()) {
                Some(pos) => previous.remove(pos).0,
                None => self.allocate_id(),
            };
            entries.push((id, row));
        }

        self.entries = entries;
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = RecordId::new(T::KIND, self.next_id);
        self.next_id += 1;
        id
    }

    /// Rewrite the whole backing file from memory
    pub fn save(&self) -> Result<()> {
        let rows: Vec<T> = self.entries.iter().map(|(_, r)| r.clone()).collect();
        write_rows(&self.path, T::HEADERS, &rows)
    }

    /// Validate, append to the file, then to memory
    pub fn append(&mut self, mut record: T) -> Result<RecordId> {
        record.normalize();
        record.validate()?;
        self.ensure_unique(record.key(), None)?;

        append_row(&self.path, &record)?;

        let id = self.allocate_id();
        debug!(kind = T::KIND, %id, name = record.key(), "Added record");
        self.entries.push((id, record));
        Ok(id)
    }

    /// Replace a record in place and rewrite the file
    ///
    /// Returns the previous value. On a failed write the old value is restored.
    pub fn replace(&mut self, id: RecordId, mut record: T) -> Result<T> {
        record.normalize();
        record.validate()?;
        self.ensure_unique(record.key(), Some(id))?;

        let pos = self.position(id)?;
        let old = match self.entries.get_mut(pos) {
            Some((_, slot)) => std::mem::replace(slot, record),
            None => return Err(self.not_found(id)),
        };

        if let Err(e) = self.save() {
            if let Some((_, slot)) = self.entries.get_mut(pos) {
                *slot = old;
            }
            return Err(e);
        }

        debug!(kind = T::KIND, %id, "Updated record");
        Ok(old)
    }

    /// Remove a record and rewrite the file
    pub fn remove(&mut self, id: RecordId) -> Result<T> {
        let pos = self.position(id)?;
        let (_, removed) = self.entries.remove(pos);

        if let Err(e) = self.save() {
            self.entries.insert(pos, (id, removed));
            return Err(e);
        }

        debug!(kind = T::KIND, %id, name = removed.key(), "Removed record");
        Ok(removed)
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, r)| r)
    }

    /// First record with exactly this name
    pub fn find(&self, name: &str) -> Option<(RecordId, &T)> {
        self.entries
            .iter()
            .find(|(_, r)| r.key() == name)
            .map(|(id, r)| (*id, r))
    }

    pub fn first(&self) -> Option<(RecordId, &T)> {
        self.entries.first().map(|(id, r)| (*id, r))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &T)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }

    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.entries
            .iter()
            .position(|(entry_id, _)| *entry_id == id)
            .ok_or_else(|| self.not_found(id))
    }

    fn not_found(&self, id: RecordId) -> TrackerError {
        TrackerError::NotFound {
            kind: T::KIND,
            key: id.to_string(),
        }
    }

    fn ensure_unique(&self, name: &str, except: Option<RecordId>) -> Result<()> {
        let clash = self
            .entries
            .iter()
            .any(|(id, r)| Some(*id) != except && r.key() == name);
        if clash {
            return Err(TrackerError::AlreadyExists {
                kind: T::KIND,
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Reward};
    use tempfile::tempdir;

    fn seeded() -> (tempfile::TempDir, Collection<Reward>) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("rewards.csv"),
            "reward_name,reward_price,regular_reward\nCoffee,20,True\nConcert,500,False\n",
        )
        .unwrap();
        let collection = Collection::open(dir.path()).unwrap();
        (dir, collection)
    }

    #[test]
    fn test_open_assigns_ids_in_file_order() {
        let (_dir, collection) = seeded();
        let ids: Vec<u64> = collection.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(collection.find("Concert").map(|(_, r)| r.price), Some(500));
    }

    #[test]
    fn test_append_rejects_duplicate_name() {
        let (_dir, mut collection) = seeded();
        let err = collection
            .append(Reward::new("Coffee", 10, true))
            .unwrap_err();
        assert!(matches!(err, TrackerError::AlreadyExists { .. }));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_ids_survive_reload() {
        let (_dir, mut collection) = seeded();
        let (concert_id, _) = collection.find("Concert").unwrap();
        let (coffee_id, _) = collection.find("Coffee").unwrap();

        collection.remove(coffee_id).unwrap();
        let new_id = collection.append(Reward::new("Book", 80, true)).unwrap();

        let rows = collection.read_file().unwrap();
        collection.replace_all(rows);

        assert_eq!(collection.find("Concert").map(|(id, _)| id), Some(concert_id));
        assert_eq!(collection.find("Book").map(|(id, _)| id), Some(new_id));
        assert!(collection.get(coffee_id).is_none());
    }

    #[test]
    fn test_replace_allows_keeping_own_name() {
        let (dir, mut collection) = seeded();
        let (id, _) = collection.find("Coffee").unwrap();

        let old = collection.replace(id, Reward::new("Coffee", 25, true)).unwrap();
        assert_eq!(old.price, 20);

        let reopened = Collection::<Reward>::open(dir.path()).unwrap();
        assert_eq!(reopened.find("Coffee").map(|(_, r)| r.price), Some(25));
    }

    #[test]
    fn test_replace_rejects_rename_onto_other_record() {
        let (_dir, mut collection) = seeded();
        let (id, _) = collection.find("Coffee").unwrap();
        let err = collection
            .replace(id, Reward::new("Concert", 25, true))
            .unwrap_err();
        assert!(matches!(err, TrackerError::AlreadyExists { .. }));
    }

    #[test]
    fn test_names_trimmed_before_uniqueness_check() {
        let (dir, mut collection) = seeded();
        let err = collection
            .append(Reward::new("  Coffee ", 10, true))
            .unwrap_err();
        assert!(matches!(err, TrackerError::AlreadyExists { .. }));

        let id = collection.append(Reward::new(" Book ", 80, true)).unwrap();
        assert_eq!(collection.get(id).map(|r| r.name.as_str()), Some("Book"));

        let reopened = Collection::<Reward>::open(dir.path()).unwrap();
        assert_eq!(reopened.find("Book").map(|(_, r)| r.price), Some(80));
    }

    #[test]
    fn test_foreign_id_not_found() {
        let (dir, mut rewards) = seeded();
        std::fs::write(
            dir.path().join("activities.csv"),
            "activity_name,activity_points,daily_task\nRun,20,True\n",
        )
        .unwrap();
        let activities = Collection::<Activity>::open(dir.path()).unwrap();
        let (run_id, _) = activities.find("Run").unwrap();

        assert!(rewards.get(run_id).is_none());
        let err = rewards
            .replace(run_id, Reward::new("Oops", 1, true))
            .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound { .. }));
        assert!(rewards.remove(run_id).is_err());
        assert_eq!(rewards.len(), 2);
    }
}
