//! gw-save: Persistence and replay for Gridwalk sessions
//!
//! Three independent artifacts live in a [`SaveDir`]: the world snapshot,
//! the action log, and the seed record. A session can be restored from the
//! snapshot alone, or rebuilt from scratch by regenerating the world from
//! the seed record and replaying the action log.
//!
//! All writes go through a temp-file-then-rename scope, so a partial write
//! is never visible at the final path. A missing file is a normal outcome
//! (`Ok(None)`), corrupt data is an error; the two are never conflated.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gw_core::command::{CommandError, SessionStart, parse_script};
use gw_core::dungeon::{GenerationError, generate};
use gw_core::tile::TileKind;
use gw_core::world::{Direction, Pos, World, WorldError};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Magic bytes identifying each artifact
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"GWSN";
pub const ACTIONS_MAGIC: &[u8; 4] = b"GWAC";
pub const SEED_MAGIC: &[u8; 4] = b"GWSD";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not a Gridwalk save file (bad magic number)")]
    InvalidMagic,

    #[error("incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("save file corrupted (checksum mismatch)")]
    ChecksumMismatch,

    #[error("save file truncated or malformed: {0}")]
    Malformed(&'static str),

    #[error("cell ({x}, {y}) holds unknown tile {glyph:?} ({description:?})")]
    UnknownTile {
        x: usize,
        y: usize,
        glyph: char,
        description: String,
    },

    #[error("snapshot is internally inconsistent: {0}")]
    Inconsistent(#[from] WorldError),
}

/// Errors from whole-session operations (load-and-play, replay)
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("no saved world to load")]
    NoSavedWorld,
}

/// Snapshot header, written as length-prefixed JSON after the magic bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotHeader {
    version: u32,
    seed: u64,
    width: usize,
    height: usize,
    player: Pos,
    wanderers: Vec<Pos>,
    actions: String,
    saved_at: u64,
}

/// Directory holding the three session artifacts
#[derive(Debug, Clone)]
pub struct SaveDir {
    root: PathBuf,
}

impl SaveDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Per-user data directory, falling back to the working directory
    pub fn default_dir() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("gridwalk");
        Self { root }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join("world.gws")
    }

    pub fn actions_path(&self) -> PathBuf {
        self.root.join("actions.gwa")
    }

    pub fn seed_path(&self) -> PathBuf {
        self.root.join("seed.gwr")
    }

    /// Create the directory if it does not exist yet
    pub fn ensure_exists(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }
}

fn timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Checksum over the cell payload, for distinguishing torn or altered
/// bytes from a well-formed record that merely names an unknown tile.
fn checksum(data: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        sum = sum.wrapping_add((byte as u32).wrapping_mul((i as u32).wrapping_add(1)));
    }
    sum
}

/// Run `write` against a temp file and rename it over `path` on success.
/// The writer is flushed and closed on every exit path; a failed write
/// leaves the previous file (if any) untouched.
fn atomic_write(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<(), SaveError>,
) -> Result<(), SaveError> {
    let tmp = path.with_extension("tmp");
    let result: Result<(), SaveError> = (|| {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn read_exact(reader: &mut impl Read, buf: &mut [u8]) -> Result<(), SaveError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SaveError::Malformed("unexpected end of file")
        } else {
            SaveError::Io(e)
        }
    })
}

fn read_u32(reader: &mut impl Read) -> Result<u32, SaveError> {
    let mut bytes = [0u8; 4];
    read_exact(reader, &mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_u64(reader: &mut impl Read) -> Result<u64, SaveError> {
    let mut bytes = [0u8; 8];
    read_exact(reader, &mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}

fn check_magic(reader: &mut impl Read, expected: &[u8; 4]) -> Result<(), SaveError> {
    let mut magic = [0u8; 4];
    read_exact(reader, &mut magic)?;
    if &magic != expected {
        return Err(SaveError::InvalidMagic);
    }
    Ok(())
}

fn check_version(found: u32) -> Result<(), SaveError> {
    if found != SAVE_VERSION {
        return Err(SaveError::IncompatibleVersion {
            expected: SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

/// Open a file for reading, mapping a missing file to `None`.
fn open_optional(path: &Path) -> Result<Option<BufReader<File>>, SaveError> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// --- Snapshot ---

/// Write a full world snapshot: magic, length-prefixed JSON header, then
/// one (glyph, description) record per cell in x-major order, then a
/// checksum over the cell payload.
pub fn save_snapshot(world: &World, path: &Path) -> Result<(), SaveError> {
    let header = SnapshotHeader {
        version: SAVE_VERSION,
        seed: world.seed(),
        width: world.width(),
        height: world.height(),
        player: world.player(),
        wanderers: world.wanderers().to_vec(),
        actions: world.action_string(),
        saved_at: timestamp(),
    };
    let header_json = serde_json::to_vec(&header)?;
    let cells = encode_cells(world);
    let sum = checksum(&cells);

    atomic_write(path, |w| {
        w.write_all(SNAPSHOT_MAGIC)?;
        w.write_all(&(header_json.len() as u32).to_le_bytes())?;
        w.write_all(&header_json)?;
        w.write_all(&cells)?;
        w.write_all(&sum.to_le_bytes())?;
        Ok(())
    })
}

/// Read a snapshot back into a validated [`World`].
///
/// Returns `Ok(None)` when no snapshot exists. Unknown (glyph, description)
/// pairs and checksum failures are distinct errors; neither ever silently
/// decodes to an empty cell.
pub fn load_snapshot(path: &Path) -> Result<Option<World>, SaveError> {
    let Some(mut reader) = open_optional(path)? else {
        return Ok(None);
    };

    check_magic(&mut reader, SNAPSHOT_MAGIC)?;
    let header_len = read_u32(&mut reader)? as usize;
    let mut header_bytes = vec![0u8; header_len];
    read_exact(&mut reader, &mut header_bytes)?;
    let header: SnapshotHeader = serde_json::from_slice(&header_bytes)?;
    check_version(header.version)?;

    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;
    if payload.len() < 4 {
        return Err(SaveError::Malformed("missing cell checksum"));
    }
    let (cell_bytes, tail) = payload.split_at(payload.len() - 4);
    let stored = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
    if checksum(cell_bytes) != stored {
        return Err(SaveError::ChecksumMismatch);
    }

    let cells = decode_cells(cell_bytes, header.width, header.height)?;
    let actions = decode_action_string(&header.actions)?;
    let world = World::restore(
        header.width,
        header.height,
        header.seed,
        cells,
        header.player,
        header.wanderers,
        actions,
    )?;
    Ok(Some(world))
}

fn encode_cells(world: &World) -> Vec<u8> {
    let mut buf = Vec::new();
    for x in 0..world.width() {
        for y in 0..world.height() {
            let kind = world.tile(x, y);
            buf.extend_from_slice(&(kind.glyph() as u32).to_le_bytes());
            let desc = kind.description().as_bytes();
            buf.extend_from_slice(&(desc.len() as u16).to_le_bytes());
            buf.extend_from_slice(desc);
        }
    }
    buf
}

fn decode_cells(bytes: &[u8], width: usize, height: usize) -> Result<Vec<Vec<TileKind>>, SaveError> {
    if width == 0 || height == 0 {
        return Err(SaveError::Malformed("zero grid dimension"));
    }

    let mut reader = SliceReader::new(bytes);
    let mut cells = vec![vec![TileKind::Empty; height]; width];
    for (x, column) in cells.iter_mut().enumerate() {
        for (y, cell) in column.iter_mut().enumerate() {
            let scalar = reader.u32()?;
            let glyph = char::from_u32(scalar)
                .ok_or(SaveError::Malformed("invalid character scalar"))?;
            let len = reader.u16()? as usize;
            let desc = std::str::from_utf8(reader.take(len)?)
                .map_err(|_| SaveError::Malformed("description is not UTF-8"))?;
            *cell = TileKind::from_encoding(glyph, desc).ok_or_else(|| SaveError::UnknownTile {
                x,
                y,
                glyph,
                description: desc.to_string(),
            })?;
        }
    }
    if !reader.is_empty() {
        return Err(SaveError::Malformed("trailing bytes after cell data"));
    }
    Ok(cells)
}

fn decode_action_string(actions: &str) -> Result<Vec<Direction>, SaveError> {
    actions
        .chars()
        .map(|c| {
            Direction::from_char(c).ok_or(SaveError::Malformed("unknown action character"))
        })
        .collect()
}

/// Cursor over an in-memory cell payload
struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], SaveError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(SaveError::Malformed("unexpected end of cell data"))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> Result<u16, SaveError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, SaveError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }
}

// --- Action log ---

/// Persist the accepted-move log, one byte per move.
pub fn save_actions(actions: &[Direction], path: &Path) -> Result<(), SaveError> {
    atomic_write(path, |w| {
        w.write_all(ACTIONS_MAGIC)?;
        w.write_all(&SAVE_VERSION.to_le_bytes())?;
        w.write_all(&(actions.len() as u32).to_le_bytes())?;
        for direction in actions {
            w.write_all(&[direction.as_char() as u8])?;
        }
        Ok(())
    })
}

/// Read the action log; `Ok(None)` when none has been written.
pub fn load_actions(path: &Path) -> Result<Option<Vec<Direction>>, SaveError> {
    let Some(mut reader) = open_optional(path)? else {
        return Ok(None);
    };

    check_magic(&mut reader, ACTIONS_MAGIC)?;
    check_version(read_u32(&mut reader)?)?;
    let count = read_u32(&mut reader)? as usize;
    let mut bytes = vec![0u8; count];
    read_exact(&mut reader, &mut bytes)?;

    let actions = bytes
        .into_iter()
        .map(|b| {
            Direction::from_char(b as char)
                .ok_or(SaveError::Malformed("unknown action character"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(actions))
}

// --- Seed record ---

/// Persist the generation seed. Written at world creation time so a replay
/// is possible even if the session never saves a snapshot.
pub fn save_seed(seed: u64, path: &Path) -> Result<(), SaveError> {
    atomic_write(path, |w| {
        w.write_all(SEED_MAGIC)?;
        w.write_all(&SAVE_VERSION.to_le_bytes())?;
        w.write_all(&seed.to_le_bytes())?;
        Ok(())
    })
}

/// Read the seed record; `Ok(None)` when none has been written.
pub fn load_seed(path: &Path) -> Result<Option<u64>, SaveError> {
    let Some(mut reader) = open_optional(path)? else {
        return Ok(None);
    };

    check_magic(&mut reader, SEED_MAGIC)?;
    check_version(read_u32(&mut reader)?)?;
    Ok(Some(read_u64(&mut reader)?))
}

// --- Whole-session operations ---

/// Save all three artifacts for a session.
pub fn save_session(world: &World, dir: &SaveDir) -> Result<(), SaveError> {
    dir.ensure_exists()?;
    save_snapshot(world, &dir.snapshot_path())?;
    save_actions(world.recorded_actions(), &dir.actions_path())?;
    save_seed(world.seed(), &dir.seed_path())
}

/// Restore the previously saved world, if any.
pub fn load_session(dir: &SaveDir) -> Result<Option<World>, SaveError> {
    load_snapshot(&dir.snapshot_path())
}

/// Regenerate a world from its seed and apply a recorded move sequence.
pub fn replay(
    width: usize,
    height: usize,
    seed: u64,
    moves: &[Direction],
) -> Result<World, GenerationError> {
    let mut world = generate(width, height, seed)?;
    world.apply_moves(moves);
    Ok(world)
}

/// Rebuild the saved session from its seed record and action log.
/// Returns `Ok(None)` when no seed has been recorded.
pub fn replay_session(
    dir: &SaveDir,
    width: usize,
    height: usize,
) -> Result<Option<World>, SessionError> {
    let Some(seed) = load_seed(&dir.seed_path())? else {
        return Ok(None);
    };
    let moves = load_actions(&dir.actions_path())?.unwrap_or_default();
    Ok(Some(replay(width, height, seed, &moves)?))
}

/// Result of a headless scripted session
#[derive(Debug)]
pub struct ScriptOutcome {
    pub world: World,
    /// True when the script ended with `:Q` and the session was saved
    pub saved: bool,
}

/// Run a complete command script headlessly: start a session per its
/// `N<seed>S`/`L` prefix, apply its moves, and honor a `:Q` save request.
pub fn play_script(
    input: &str,
    width: usize,
    height: usize,
    dir: &SaveDir,
) -> Result<ScriptOutcome, SessionError> {
    let script = parse_script(input)?;

    let mut world = match script.start {
        SessionStart::New { seed } => {
            let world = generate(width, height, seed)?;
            dir.ensure_exists().map_err(SaveError::from)?;
            save_seed(seed, &dir.seed_path())?;
            world
        }
        SessionStart::Load => load_session(dir)?.ok_or(SessionError::NoSavedWorld)?,
    };

    world.apply_moves(&script.moves);

    if script.save_requested {
        save_session(&world, dir)?;
    }

    Ok(ScriptOutcome {
        world,
        saved: script.save_requested,
    })
}
