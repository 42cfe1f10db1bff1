use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use log::{debug, info, warn};

use crate::structs::{Fat, Superblock, SUPERBLOCK_SIZE};
use crate::tree::{ChildRecord, Entry, EntryId, EntryKind, Tree};
use crate::utils::{format_size, format_time, split_path, timestamp_now};
use crate::Error;

mod store;

pub use store::{BackingStore, BlockDevice};

/// The root directory's chain always starts at block 0: it is the first
/// allocation a fresh store ever makes.
const ROOT_FBLOCK: u32 = 0;

/// Backing paths currently mounted by this process. A second mount of the
/// same path is rejected instead of silently sharing the store.
static MOUNTED: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();

#[derive(Debug)]
struct MountGuard {
    path: PathBuf,
}

impl MountGuard {
    fn register(path: PathBuf) -> Result<Self, Error> {
        let registry = MOUNTED.get_or_init(Default::default);
        let mut mounted = registry.lock().expect("mount registry poisoned");
        if !mounted.insert(path.clone()) {
            return Err(Error::StoreBusy);
        }
        Ok(Self { path })
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if let Some(registry) = MOUNTED.get() {
            if let Ok(mut mounted) = registry.lock() {
                mounted.remove(&self.path);
            }
        }
    }
}

/// Aggregate usage report for the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfInfo {
    pub files: u64,
    pub directories: u64,
    pub free_space: u64,
    pub wasted_space: u64,
}

impl Display for DfInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Files: {}", self.files)?;
        writeln!(f, "Directories: {}", self.directories)?;
        writeln!(f, "Free space: {}", format_size(self.free_space))?;
        writeln!(f, "Wasted space: {}", format_size(self.wasted_space))
    }
}

#[derive(Debug)]
pub struct Filesystem {
    pub(crate) superblock: Superblock,
    pub(crate) fat: Fat,
    pub(crate) tree: Tree,
    pub(crate) store: BackingStore,
    mount_guard: Option<MountGuard>,
}

impl Filesystem {
    /// Initialize a fresh store on `device`: empty FAT and bitmap, a root
    /// directory with zero children, header and root block persisted.
    pub fn new(device: Box<dyn BlockDevice>, blocks_num: u32, block_size: u32) -> Result<Self, Error> {
        let superblock = Superblock::new(blocks_num, block_size);
        let mut fat = Fat::new(blocks_num);
        let tree = Tree::new();
        let root_head = fat.add_file()?;
        debug_assert_eq!(root_head, ROOT_FBLOCK);
        let mut fs = Self {
            superblock,
            fat,
            tree,
            store: BackingStore::new(device),
            mount_guard: None,
        };
        fs.tree.get_mut(fs.tree.root()).fblock = root_head;
        fs.persist_directory(fs.tree.root())?;
        fs.persist_header()?;
        info!("initialized store: {blocks_num} blocks of {block_size} bytes");
        Ok(fs)
    }

    /// Load an existing store from `device`: superblock first to learn the
    /// geometry, then the full header region, then the directory tree out of
    /// the data blocks.
    pub fn load(device: Box<dyn BlockDevice>) -> Result<Self, Error> {
        let mut store = BackingStore::new(device);
        let superblock = Superblock::load(&store.read_header(SUPERBLOCK_SIZE)?)?;
        let header = store.read_header(superblock.blocks_offset() as usize)?;
        let fat = Fat::load(&header[SUPERBLOCK_SIZE..], superblock.blocks_num)?;
        if !fat.bitmap().get(ROOT_FBLOCK) {
            return Err(Error::MalformedStore(
                "root directory chain head is unallocated".into(),
            ));
        }
        let mut fs = Self {
            superblock,
            fat,
            tree: Tree::new(),
            store,
            mount_guard: None,
        };
        fs.tree.get_mut(fs.tree.root()).fblock = ROOT_FBLOCK;
        fs.load_directory(fs.tree.root())?;
        info!(
            "loaded store: {} blocks of {} bytes, {} entries",
            fs.superblock.blocks_num,
            fs.superblock.block_size,
            fs.tree.len()
        );
        Ok(fs)
    }

    /// Mount the store at `path`, creating and sizing it first if it does
    /// not exist yet. Mounting a path twice from one process is refused.
    pub fn mount(path: &Path, blocks_num: u32, block_size: u32) -> Result<Self, Error> {
        let mut fs = if !path.exists() {
            let superblock = Superblock::new(blocks_num, block_size);
            let file = File::options()
                .read(true)
                .write(true)
                .create_new(true)
                .open(path)?;
            file.set_len(superblock.total_size())?;
            let guard = MountGuard::register(path.canonicalize()?)?;
            let mut fs = Self::new(Box::new(file), blocks_num, block_size)?;
            fs.mount_guard = Some(guard);
            fs
        } else {
            let guard = MountGuard::register(path.canonicalize()?)?;
            warn!("store {} already exists, mounting on top of it", path.display());
            let file = File::options().read(true).write(true).open(path)?;
            let mut fs = Self::load(Box::new(file))?;
            fs.mount_guard = Some(guard);
            fs
        };
        fs.store.flush()?;
        Ok(fs)
    }

    /// Give the device back, e.g. to re-load the store it now holds.
    pub fn into_device(self) -> Box<dyn BlockDevice> {
        self.store.into_device()
    }

    pub fn superblock(&self) -> &Superblock {
        &self.superblock
    }

    pub fn entry(&self, id: EntryId) -> &Entry {
        self.tree.get(id)
    }

    /// Look `name` up among the children of the directory at `dir_path`.
    pub fn find(&self, dir_path: &str, name: &str) -> Result<EntryId, Error> {
        self.tree.find(&split_path(dir_path), name)
    }

    /// Create a regular file at `path`.
    pub fn touch(&mut self, path: &str) -> Result<EntryId, Error> {
        self.create_entry(path, EntryKind::File)
    }

    /// Create a directory at `path`.
    pub fn mkdir(&mut self, path: &str) -> Result<EntryId, Error> {
        self.create_entry(path, EntryKind::Directory)
    }

    fn create_entry(&mut self, path: &str, kind: EntryKind) -> Result<EntryId, Error> {
        let components = split_path(path);
        let resolved = self.tree.resolve_entry(&components)?;
        if components.is_empty() || resolved.entry.is_some() {
            return Err(Error::AlreadyExists);
        }
        let head = self.fat.add_file()?;
        let mut entry = Entry::new(&resolved.name, kind);
        entry.fblock = head;
        let id = self.tree.insert(entry);
        self.tree.add_child(resolved.parent, id);
        let persisted = match kind {
            // A new directory gets its own empty content block on disk.
            EntryKind::Directory => self
                .persist_directory(id)
                .and_then(|_| self.persist_directory(resolved.parent)),
            EntryKind::File => self.persist_directory(resolved.parent),
        };
        if let Err(e) = persisted {
            self.tree.remove_subtree(id);
            let _ = self.fat.remove_file(head);
            return Err(e);
        }
        self.persist_header()?;
        debug!("created {kind:?} {path:?} with chain head {head}");
        Ok(id)
    }

    /// Copy the OS file at `source` into the store at `dest`.
    pub fn cp(&mut self, source: &Path, dest: &str) -> Result<EntryId, Error> {
        let mut file = File::open(source)?;
        let size = file.metadata()?.len();
        self.cp_from_reader(&mut file, size, dest)
    }

    /// Copy `size` bytes from `src` into a new file at `dest`. The content
    /// chain is fully written before the entry becomes visible, so a failed
    /// copy leaves no trace.
    pub fn cp_from_reader(
        &mut self,
        src: &mut dyn Read,
        size: u64,
        dest: &str,
    ) -> Result<EntryId, Error> {
        let components = split_path(dest);
        let resolved = self.tree.resolve_entry(&components)?;
        if components.is_empty() || resolved.entry.is_some() {
            return Err(Error::AlreadyExists);
        }
        let head = self.fat.add_file()?;
        if let Err(e) = self.copy_chain(src, size, head) {
            let _ = self.fat.remove_file(head);
            return Err(e);
        }
        let mut entry = Entry::new(&resolved.name, EntryKind::File);
        entry.size = size;
        entry.fblock = head;
        let id = self.tree.insert(entry);
        self.tree.add_child(resolved.parent, id);
        if let Err(e) = self.persist_directory(resolved.parent) {
            self.tree.remove_subtree(id);
            let _ = self.fat.remove_file(head);
            return Err(e);
        }
        self.persist_header()?;
        info!("copied {size} bytes to {dest:?}");
        Ok(id)
    }

    fn copy_chain(&mut self, src: &mut dyn Read, size: u64, head: u32) -> Result<(), Error> {
        let block_size = self.superblock.block_size as u64;
        let blocks_needed = if size == 0 { 1 } else { (size - 1) / block_size + 1 };
        let mut remaining = size;
        let mut copied = 0u64;
        let mut block = head;
        for i in 0..blocks_needed {
            let to_write = remaining.min(block_size) as u32;
            copied += self
                .store
                .write_block_from(&self.superblock, block, src, to_write)?;
            remaining -= to_write as u64;
            if i + 1 < blocks_needed {
                block = self.fat.add_block(head)?;
            }
        }
        if copied != size {
            return Err(Error::InvariantViolation(format!(
                "copied {copied} of {size} bytes"
            )));
        }
        Ok(())
    }

    /// Stream the file at `path` into `out`, block by block, trimming the
    /// final block to the remaining logical size.
    pub fn cat(&mut self, path: &str, out: &mut dyn Write) -> Result<(), Error> {
        let resolved = self.tree.resolve_entry(&split_path(path))?;
        let id = resolved.entry.ok_or(Error::NotFound)?;
        let entry = self.tree.get(id);
        if entry.is_directory() {
            return Err(Error::IsADirectory);
        }
        let (head, size) = (entry.fblock, entry.size);
        let mut remaining = size;
        for block in self.fat.chain_blocks(head)? {
            if remaining == 0 {
                break;
            }
            let to_write = remaining.min(self.superblock.block_size as u64) as u32;
            self.store
                .copy_block_to(&self.superblock, block, to_write, out)?;
            remaining -= to_write as u64;
        }
        if remaining > 0 {
            return Err(Error::MalformedStore(format!(
                "chain at block {head} is {remaining} bytes short of the file size"
            )));
        }
        Ok(())
    }

    /// Remove the entry at `path`, recursing into directories. `Ok(false)`
    /// when nothing was found.
    pub fn rm(&mut self, path: &str) -> Result<bool, Error> {
        self.remove_entry(path, false)
    }

    /// Like [`rm`](Self::rm), but refuses non-directories without mutating.
    pub fn rmdir(&mut self, path: &str) -> Result<bool, Error> {
        self.remove_entry(path, true)
    }

    fn remove_entry(&mut self, path: &str, require_dir: bool) -> Result<bool, Error> {
        let components = split_path(path);
        if components.is_empty() {
            // The root itself is never removable.
            return Ok(false);
        }
        let resolved = match self.tree.resolve_entry(&components) {
            Ok(resolved) => resolved,
            Err(Error::NotFound) | Err(Error::NotADirectory) => return Ok(false),
            Err(e) => return Err(e),
        };
        let id = match resolved.entry {
            Some(id) => id,
            None => return Ok(false),
        };
        if require_dir && !self.tree.get(id).is_directory() {
            warn!("{path:?} is not a directory");
            return Ok(false);
        }
        // Children first, then the entry itself; every chain is released.
        for victim in self.tree.post_order(id) {
            let head = self.tree.get(victim).fblock;
            self.fat.remove_file(head)?;
        }
        self.tree.remove_subtree(id);
        self.persist_directory(resolved.parent)?;
        self.persist_header()?;
        debug!("removed {path:?}");
        Ok(true)
    }

    /// Formatted listing of the directory at `path`: synthetic `.` and `..`
    /// for the directory itself, then each child in insertion order.
    pub fn ls(&self, path: &str) -> Result<String, Error> {
        let dir = self.tree.resolve_dir(&split_path(path))?;
        let line = |entry: &Entry, name: &str| {
            format!(
                "{} {:>8} {} {}\n",
                if entry.is_directory() { 'd' } else { 'f' },
                format_size(entry.size),
                format_time(entry.mtime),
                name
            )
        };
        let entry = self.tree.get(dir);
        let mut listing = String::new();
        listing.push_str(&line(entry, "."));
        listing.push_str(&line(entry, ".."));
        for &child in &entry.children {
            let child = self.tree.get(child);
            listing.push_str(&line(child, &child.name));
        }
        Ok(listing)
    }

    /// Aggregate file/directory counts, free space, and the space lost to
    /// partially filled final blocks.
    pub fn df(&self) -> Result<DfInfo, Error> {
        let block_size = self.superblock.block_size as u64;
        let mut info = DfInfo {
            files: 0,
            directories: 0,
            free_space: 0,
            wasted_space: 0,
        };
        let mut used = 0u64;
        for id in self.tree.post_order(self.tree.root()) {
            let entry = self.tree.get(id);
            let occupied = self.fat.chain_blocks(entry.fblock)?.len() as u64 * block_size;
            used += occupied;
            if entry.is_directory() {
                info.directories += 1;
            } else {
                info.files += 1;
                info.wasted_space += occupied - entry.size;
            }
        }
        info.free_space = self.superblock.blocks_num as u64 * block_size - used;
        Ok(info)
    }

    /// Serialize superblock, FAT, and bitmap into the header region with a
    /// single positioned write.
    fn persist_header(&mut self) -> Result<(), Error> {
        let mut header = vec![0u8; self.superblock.blocks_offset() as usize];
        let written = self.superblock.serialize(&mut header)?;
        self.fat.serialize(&mut header[written..])?;
        self.store.write_header(&header)
    }

    /// Serialize a directory's children into its own content chain,
    /// extending the chain when the listing outgrows it.
    fn persist_directory(&mut self, dir: EntryId) -> Result<(), Error> {
        let children = self.tree.get(dir).children.clone();
        let mut content = Vec::new();
        content.extend_from_slice(&(children.len() as u32).to_le_bytes());
        for &child in &children {
            content.extend_from_slice(&ChildRecord::from_entry(self.tree.get(child)).as_bytes());
        }
        {
            let entry = self.tree.get_mut(dir);
            entry.size = content.len() as u64;
            entry.mtime = timestamp_now();
        }
        let head = self.tree.get(dir).fblock;
        let block_size = self.superblock.block_size as usize;
        let blocks_needed = ((content.len() - 1) / block_size) + 1;
        let mut chain = self.fat.chain_blocks(head)?;
        while chain.len() < blocks_needed {
            chain.push(self.fat.add_block(head)?);
        }
        for (i, &block) in chain.iter().take(blocks_needed).enumerate() {
            let start = i * block_size;
            let end = content.len().min(start + block_size);
            self.store
                .write_block(&self.superblock, block, &content[start..end])?;
        }
        Ok(())
    }

    /// Read a directory's content chain and rebuild its children,
    /// recursing into subdirectories.
    fn load_directory(&mut self, dir: EntryId) -> Result<(), Error> {
        let head = self.tree.get(dir).fblock;
        let bytes = self.read_chain(head)?;
        if bytes.len() < 4 {
            return Err(Error::MalformedStore(format!(
                "directory block at {head} truncated"
            )));
        }
        let count = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let mut at = 4;
        let mut subdirs = Vec::new();
        for _ in 0..count {
            let (record, consumed) = ChildRecord::from_bytes(&bytes[at..])?;
            at += consumed;
            let is_dir = record.kind == EntryKind::Directory;
            let child = self.tree.insert(record.into_entry());
            self.tree.add_child(dir, child);
            if is_dir {
                subdirs.push(child);
            }
        }
        self.tree.get_mut(dir).size = at as u64;
        for subdir in subdirs {
            self.load_directory(subdir)?;
        }
        Ok(())
    }

    /// Whole content of a chain, one full block per chain member.
    fn read_chain(&mut self, head: u32) -> Result<Vec<u8>, Error> {
        let block_size = self.superblock.block_size as usize;
        let blocks = self.fat.chain_blocks(head)?;
        let mut bytes = vec![0u8; blocks.len() * block_size];
        for (i, &block) in blocks.iter().enumerate() {
            self.store.read_block(
                &self.superblock,
                block,
                &mut bytes[i * block_size..(i + 1) * block_size],
            )?;
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{BlockDevice, Filesystem};
    use crate::Error;

    impl BlockDevice for Cursor<Vec<u8>> {}

    fn fresh(blocks: u32, block_size: u32) -> Filesystem {
        let device = Cursor::new(Vec::new());
        Filesystem::new(Box::new(device), blocks, block_size).unwrap()
    }

    #[test]
    fn new_store_has_empty_root() {
        let fs = fresh(64, 512);
        assert_eq![fs.tree.len(), 1];
        assert_eq![fs.entry(fs.tree.root()).children.len(), 0];
        assert![fs.fat.bitmap().get(0)];
        assert![!fs.fat.bitmap().get(1)];
    }

    #[test]
    fn touch_find_rm() {
        let mut fs = fresh(64, 512);
        let id = fs.touch("/a").unwrap();
        assert_eq![fs.find("/", "a").unwrap(), id];
        assert![fs.rm("/a").unwrap()];
        assert![matches!(fs.find("/", "a"), Err(Error::NotFound))];
        assert![!fs.rm("/a").unwrap()];
    }

    #[test]
    fn touch_collision_is_rejected() {
        let mut fs = fresh(64, 512);
        fs.touch("/a").unwrap();
        assert![matches!(fs.touch("/a"), Err(Error::AlreadyExists))];
    }

    #[test]
    fn mkdir_nested_paths() {
        let mut fs = fresh(64, 512);
        fs.mkdir("/docs").unwrap();
        fs.mkdir("/docs/old").unwrap();
        fs.touch("/docs/old/notes").unwrap();
        assert![fs.find("/docs/old", "notes").is_ok()];
        assert![matches!(fs.touch("/missing/file"), Err(Error::NotFound))];
    }

    #[test]
    fn remount_preserves_tree() {
        let mut fs = fresh(64, 512);
        fs.mkdir("/docs").unwrap();
        fs.touch("/docs/notes").unwrap();
        fs.touch("/readme").unwrap();
        let device = fs.into_device();

        let fs = Filesystem::load(device).unwrap();
        assert_eq![fs.tree.len(), 4];
        assert![fs.find("/", "docs").is_ok()];
        assert![fs.find("/docs", "notes").is_ok()];
        let readme = fs.find("/", "readme").unwrap();
        assert![!fs.entry(readme).is_directory()];
    }

    #[test]
    fn cp_cat_roundtrip_partial_final_block() {
        let mut fs = fresh(64, 512);
        // 2.5 blocks worth of patterned bytes
        let payload = (0..1280u32).map(|v| v as u8).collect::<Vec<u8>>();
        let id = fs
            .cp_from_reader(&mut Cursor::new(payload.clone()), 1280, "/b")
            .unwrap();
        let head = fs.entry(id).fblock;
        assert_eq![fs.fat.chain_blocks(head).unwrap().len(), 3];
        assert_eq![fs.entry(id).size, 1280];

        let mut out = Vec::new();
        fs.cat("/b", &mut out).unwrap();
        assert_eq![out, payload];
    }

    #[test]
    fn cp_to_existing_destination_fails() {
        let mut fs = fresh(64, 512);
        fs.touch("/b").unwrap();
        let result = fs.cp_from_reader(&mut Cursor::new(vec![1, 2, 3]), 3, "/b");
        assert![matches!(result, Err(Error::AlreadyExists))];
    }

    #[test]
    fn cat_of_directory_fails() {
        let mut fs = fresh(64, 512);
        fs.mkdir("/d").unwrap();
        let mut out = Vec::new();
        assert![matches!(fs.cat("/d", &mut out), Err(Error::IsADirectory))];
        assert![matches!(
            fs.cat("/missing", &mut out),
            Err(Error::NotFound)
        )];
    }

    #[test]
    fn failed_copy_leaves_no_trace() {
        // 4 blocks total, one taken by the root: a 4-block file cannot fit.
        let mut fs = fresh(4, 512);
        let payload = vec![7u8; 4 * 512];
        let result = fs.cp_from_reader(&mut Cursor::new(payload), 4 * 512, "/big");
        assert![matches!(result, Err(Error::OutOfSpace))];
        assert![fs.find("/", "big").is_err()];
        let info = fs.df().unwrap();
        assert_eq![info.files, 0];
        assert_eq![info.free_space, 3 * 512];
    }

    #[test]
    fn rm_recurses_and_frees_blocks() {
        let mut fs = fresh(64, 512);
        fs.mkdir("/d").unwrap();
        fs.touch("/d/a").unwrap();
        fs.touch("/d/b").unwrap();
        let before = fs.df().unwrap();
        assert![fs.rm("/d").unwrap()];
        let after = fs.df().unwrap();
        assert_eq![fs.tree.len(), 1];
        assert_eq![after.free_space, before.free_space + 3 * 512];
    }

    #[test]
    fn rmdir_refuses_files() {
        let mut fs = fresh(64, 512);
        fs.touch("/plain").unwrap();
        assert![!fs.rmdir("/plain").unwrap()];
        assert![fs.find("/", "plain").is_ok()];
        fs.mkdir("/d").unwrap();
        assert![fs.rmdir("/d").unwrap()];
    }

    #[test]
    fn ls_reports_synthetic_entries_first() {
        let mut fs = fresh(64, 512);
        fs.mkdir("/d").unwrap();
        fs.touch("/d/child").unwrap();
        let listing = fs.ls("/d").unwrap();
        let lines = listing.lines().collect::<Vec<_>>();
        assert_eq![lines.len(), 3];
        assert![lines[0].starts_with('d') && lines[0].ends_with(" .")];
        assert![lines[1].ends_with(" ..")];
        assert![lines[2].starts_with('f') && lines[2].ends_with(" child")];
        assert![matches!(fs.ls("/nope"), Err(Error::NotFound))];
    }

    #[test]
    fn df_accounts_for_wasted_space() {
        let mut fs = fresh(64, 512);
        fs.cp_from_reader(&mut Cursor::new(vec![1u8; 700]), 700, "/a")
            .unwrap();
        fs.cp_from_reader(&mut Cursor::new(vec![2u8; 100]), 100, "/b")
            .unwrap();
        let info = fs.df().unwrap();
        assert_eq![info.files, 2];
        assert_eq![info.directories, 1];
        // /a: 2 blocks for 700 bytes, /b: 1 block for 100 bytes
        assert_eq![info.wasted_space, (2 * 512 - 700) + (512 - 100)];
        assert_eq![info.free_space, (64 - 1 - 2 - 1) * 512];
    }

    #[test]
    fn remount_preserves_fat_and_bitmap() {
        let mut fs = fresh(16, 512);
        let payload = (0..1000u32).map(|v| v as u8).collect::<Vec<u8>>();
        fs.cp_from_reader(&mut Cursor::new(payload.clone()), 1000, "/data")
            .unwrap();
        let chain_before = {
            let id = fs.find("/", "data").unwrap();
            fs.fat.chain_blocks(fs.entry(id).fblock).unwrap()
        };
        let bitmap_before = fs.fat.bitmap().as_bytes().to_vec();

        let mut fs = Filesystem::load(fs.into_device()).unwrap();
        let id = fs.find("/", "data").unwrap();
        assert_eq![fs.fat.chain_blocks(fs.entry(id).fblock).unwrap(), chain_before];
        assert_eq![fs.fat.bitmap().as_bytes(), &bitmap_before[..]];

        let mut out = Vec::new();
        fs.cat("/data", &mut out).unwrap();
        assert_eq![out, payload];
    }

    #[test]
    fn mount_creates_sized_store_and_rejects_double_mount() {
        let path = std::env::temp_dir().join(format!(
            "fatsim-test-{}-{}",
            std::process::id(),
            crate::utils::timestamp_now()
        ));
        let fs = Filesystem::mount(&path, 32, 512).unwrap();
        let expected = fs.superblock().total_size();
        assert_eq![std::fs::metadata(&path).unwrap().len(), expected];
        assert![matches!(
            Filesystem::mount(&path, 32, 512),
            Err(Error::StoreBusy)
        )];
        drop(fs);
        let fs = Filesystem::mount(&path, 32, 512).unwrap();
        assert_eq![fs.entry(fs.tree.root()).children.len(), 0];
        drop(fs);
        std::fs::remove_file(&path).unwrap();
    }
}
