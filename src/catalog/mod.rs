//! Grouped, sorted views of activities and rewards for display
//!
//! Each catalog splits its records into two groups by their category flag and
//! sorts each group by value (points or price), lowest first. Records with
//! equal values keep their file order. Empty groups are left out.

use serde::Serialize;

use crate::models::{Activity, RecordId, Reward};
use crate::store::{Collection, Record};

/// Which collection a catalog is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Activities,
    Rewards,
}

/// Display group a record falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Daily,
    Miscellaneous,
    Regular,
    LongTerm,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily Tasks",
            Self::Miscellaneous => "Miscellaneous",
            Self::Regular => "Regular Rewards",
            Self::LongTerm => "Long-term Rewards",
        }
    }
}

/// A record that can be listed in a catalog
pub trait Catalogued: Record {
    const CATALOG: CatalogKind;
    /// Group for flagged records first, then for the rest
    const GROUPS: [Category; 2];

    fn is_flagged(&self) -> bool;
    fn sort_value(&self) -> u64;
}

impl Catalogued for Activity {
    const CATALOG: CatalogKind = CatalogKind::Activities;
    const GROUPS: [Category; 2] = [Category::Daily, Category::Miscellaneous];

    fn is_flagged(&self) -> bool {
        self.daily
    }

    fn sort_value(&self) -> u64 {
        self.points
    }
}

impl Catalogued for Reward {
    const CATALOG: CatalogKind = CatalogKind::Rewards;
    const GROUPS: [Category; 2] = [Category::Regular, Category::LongTerm];

    fn is_flagged(&self) -> bool {
        self.regular
    }

    fn sort_value(&self) -> u64 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: RecordId,
    pub category: Category,
    pub name: String,
    /// Points earned or price paid
    pub value: u64,
}

impl CatalogEntry {
    pub fn record_id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogGroup {
    pub category: Category,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub groups: Vec<CatalogGroup>,
}

impl Catalog {
    /// Build the catalog for a collection
    pub fn build<T: Catalogued>(collection: &Collection<T>) -> Self {
        let groups = T::GROUPS
            .iter()
            .enumerate()
            .filter_map(|(i, category)| {
                let flagged = i == 0;
                let mut entries: Vec<CatalogEntry> = collection
                    .iter()
                    .filter(|(_, record)| record.is_flagged() == flagged)
                    .map(|(id, record)| CatalogEntry {
                        id,
                        category: *category,
                        name: record.key().to_string(),
                        value: record.sort_value(),
                    })
                    .collect();
                // stable: equal values keep file order
                entries.sort_by_key(|e| e.value);

                (!entries.is_empty()).then_some(CatalogGroup {
                    category: *category,
                    entries,
                })
            })
            .collect();

        Self {
            kind: T::CATALOG,
            groups,
        }
    }

    /// All entries in display order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.groups.iter().flat_map(|g| g.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Entry at a 1-based display position, counting across groups
    pub fn nth(&self, number: usize) -> Option<&CatalogEntry> {
        number.checked_sub(1).and_then(|i| self.entries().nth(i))
    }

    /// Resolve a displayed entry back to its record by exact name
    pub fn resolve(&self, category: Category, name: &str) -> Option<RecordId> {
        self.entries()
            .find(|e| e.category == category && e.name == name)
            .map(CatalogEntry::record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn activities(content: &str) -> (tempfile::TempDir, Collection<Activity>) {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("activities.csv"),
            format!("activity_name,activity_points,daily_task\n{content}"),
        )
        .unwrap();
        let collection = Collection::open(dir.path()).unwrap();
        (dir, collection)
    }

    fn names(group: &CatalogGroup) -> Vec<&str> {
        group.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_groups_sorted_by_points() {
        let (_dir, collection) = activities("A,10,True\nB,5,True\nC,20,False\n");
        let catalog = Catalog::build(&collection);

        assert_eq!(catalog.kind, CatalogKind::Activities);
        assert_eq!(catalog.groups.len(), 2);
        assert_eq!(catalog.groups[0].category, Category::Daily);
        assert_eq!(names(&catalog.groups[0]), vec!["B", "A"]);
        assert_eq!(catalog.groups[1].category, Category::Miscellaneous);
        assert_eq!(names(&catalog.groups[1]), vec!["C"]);
    }

    #[test]
    fn test_equal_values_keep_file_order() {
        let (_dir, collection) = activities("Z,5,False\nY,5,False\nX,1,False\n");
        let catalog = Catalog::build(&collection);
        assert_eq!(names(&catalog.groups[0]), vec!["X", "Z", "Y"]);
    }

    #[test]
    fn test_empty_group_omitted() {
        let (_dir, collection) = activities("Walk,3,False\n");
        let catalog = Catalog::build(&collection);
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].category, Category::Miscellaneous);
    }

    #[test]
    fn test_nth_and_resolve() {
        let (_dir, collection) = activities("A,10,True\nB,5,True\nC,20,False\n");
        let catalog = Catalog::build(&collection);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.nth(1).map(|e| e.name.as_str()), Some("B"));
        assert_eq!(catalog.nth(3).map(|e| e.name.as_str()), Some("C"));
        assert!(catalog.nth(0).is_none());
        assert!(catalog.nth(4).is_none());

        let id = catalog.resolve(Category::Miscellaneous, "C").unwrap();
        assert_eq!(collection.get(id).map(|a| a.points), Some(20));
        assert!(catalog.resolve(Category::Daily, "C").is_none());
    }
}
