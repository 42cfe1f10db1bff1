mod record;

pub use record::ChildRecord;

use crate::utils::timestamp_now;
use crate::Error;

pub const ROOT_NAME: &str = "/";

pub type EntryId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One node of the namespace. Entries live in the [`Tree`] arena and refer
/// to each other by index, so a child can point back at its parent without
/// an ownership cycle.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    pub ctime: u64,
    pub mtime: u64,
    pub atime: u64,
    /// Head of this entry's content chain in the FAT.
    pub fblock: u32,
    pub parent: Option<EntryId>,
    /// Ordered; listing order is insertion order. Only meaningful for
    /// directories.
    pub children: Vec<EntryId>,
}

impl Entry {
    pub fn new(name: &str, kind: EntryKind) -> Self {
        let now = timestamp_now();
        Self {
            name: name.to_owned(),
            kind,
            size: 0,
            ctime: now,
            mtime: now,
            atime: now,
            fblock: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Outcome of resolving a path down to its final component: the parent
/// directory it lives in, the component name, and the entry if it exists.
/// Threaded through façade calls instead of a shared traversal cursor.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub parent: EntryId,
    pub name: String,
    pub entry: Option<EntryId>,
}

/// Arena of directory entries addressed by stable indices. Slot 0 is always
/// the root; removed slots are reused before the arena grows.
#[derive(Debug)]
pub struct Tree {
    entries: Vec<Option<Entry>>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            entries: vec![Some(Entry::new(ROOT_NAME, EntryKind::Directory))],
        }
    }

    pub fn root(&self) -> EntryId {
        0
    }

    pub fn get(&self, id: EntryId) -> &Entry {
        self.entries[id].as_ref().expect("live entry")
    }

    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry {
        self.entries[id].as_mut().expect("live entry")
    }

    pub fn insert(&mut self, entry: Entry) -> EntryId {
        match self.entries.iter().position(Option::is_none) {
            Some(slot) => {
                self.entries[slot] = Some(entry);
                slot
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        }
    }

    /// Append `child` to `dir`'s children and set its parent back-reference.
    pub fn add_child(&mut self, dir: EntryId, child: EntryId) {
        self.get_mut(child).parent = Some(dir);
        self.get_mut(dir).children.push(child);
    }

    pub fn child_by_name(&self, dir: EntryId, name: &str) -> Option<EntryId> {
        self.get(dir)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).name == name)
    }

    /// Resolve `components` to a directory, level by level, case-sensitively.
    pub fn resolve_dir(&self, components: &[&str]) -> Result<EntryId, Error> {
        let mut current = self.root();
        for name in components {
            let child = self.child_by_name(current, name).ok_or(Error::NotFound)?;
            if !self.get(child).is_directory() {
                return Err(Error::NotADirectory);
            }
            current = child;
        }
        Ok(current)
    }

    /// Resolve all but the last component as a directory path, then look the
    /// final component up in that parent. An empty path resolves to the root.
    pub fn resolve_entry(&self, components: &[&str]) -> Result<Resolved, Error> {
        match components.split_last() {
            None => Ok(Resolved {
                parent: self.root(),
                name: ROOT_NAME.to_owned(),
                entry: Some(self.root()),
            }),
            Some((last, dirs)) => {
                let parent = self.resolve_dir(dirs)?;
                Ok(Resolved {
                    parent,
                    name: (*last).to_owned(),
                    entry: self.child_by_name(parent, last),
                })
            }
        }
    }

    /// Resolve `dir_components` to a directory, then look `name` up among
    /// its children.
    pub fn find(&self, dir_components: &[&str], name: &str) -> Result<EntryId, Error> {
        let dir = self.resolve_dir(dir_components)?;
        self.child_by_name(dir, name).ok_or(Error::NotFound)
    }

    /// Ids of the subtree rooted at `id`, children before their parent.
    pub fn post_order(&self, id: EntryId) -> Vec<EntryId> {
        let mut order = Vec::new();
        for &child in &self.get(id).children {
            order.extend(self.post_order(child));
        }
        order.push(id);
        order
    }

    /// Detach `id` from its parent and drop the whole subtree. The root
    /// cannot be detached. Chains must already be released through the FAT.
    pub fn remove_subtree(&mut self, id: EntryId) {
        let parent = self.get(id).parent.expect("cannot remove the root");
        self.get_mut(parent).children.retain(|&c| c != id);
        for slot in self.post_order(id) {
            self.entries[slot] = None;
        }
    }

    /// Count of live entries, root included.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
