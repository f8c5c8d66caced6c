//! # Draft Model
//!
//! In-memory representation of a weaving draft.
//!
//! A draft is a set of named sections. The three pattern sections
//! (`threading`, `tieup`, `treadling`) are held as typed maps; every other
//! section (`wif`, `weaving`, `warp`, `weft`, `contents`, color tables, notes...)
//! is kept verbatim as a JSON object so it survives a round trip untouched.
//!
//! ## Sharing
//!
//! Every section lives behind an `Arc`. Drafts are never mutated in place:
//! `with_threading` / `with_tieup` / `with_treadling` return a new draft that
//! shares all other sections with the original. Consumers can compare section
//! identity with [`Draft::shares_section`] to skip work for unchanged sections.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// An uninterpreted section: string keys to JSON values
pub type Section = Map<String, Value>;

pub const WIF_SECTION: &str = "wif";
pub const CONTENTS_SECTION: &str = "contents";
pub const WEAVING_SECTION: &str = "weaving";
pub const WARP_SECTION: &str = "warp";
pub const WEFT_SECTION: &str = "weft";

static EMPTY_THREADING: Threading = Threading(BTreeMap::new());
static EMPTY_TIEUP: Tieup = Tieup(BTreeMap::new());
static EMPTY_TREADLING: Treadling = Treadling(BTreeMap::new());

/// The pattern sections the editor can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    Threading,
    Tieup,
    Treadling,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::Threading,
        PatternKind::Tieup,
        PatternKind::Treadling,
    ];

    pub fn section_name(self) -> &'static str {
        match self {
            PatternKind::Threading => "threading",
            PatternKind::Tieup => "tieup",
            PatternKind::Treadling => "treadling",
        }
    }

    pub fn from_section_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.section_name() == name)
    }
}

/// Thread number → shaft number. At most one shaft per thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Threading(BTreeMap<u32, u32>);

impl Threading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shaft the thread passes through, if any
    pub fn shaft(&self, thread: u32) -> Option<u32> {
        self.0.get(&thread).copied()
    }

    /// Assign a thread to a shaft, returning the previous shaft
    pub fn assign(&mut self, thread: u32, shaft: u32) -> Option<u32> {
        self.0.insert(thread, shaft)
    }

    /// Leave a thread unassigned, returning the previous shaft
    pub fn unassign(&mut self, thread: u32) -> Option<u32> {
        self.0.remove(&thread)
    }

    /// (thread, shaft) pairs in ascending thread order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(thread, shaft)| (*thread, *shaft))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_thread(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    pub fn max_shaft(&self) -> Option<u32> {
        self.0.values().max().copied()
    }
}

impl FromIterator<(u32, u32)> for Threading {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Treadle number → set of shaft numbers it raises
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tieup(BTreeMap<u32, BTreeSet<u32>>);

impl Tieup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shafts tied to a treadle (ascending)
    pub fn shafts(&self, treadle: u32) -> Option<&BTreeSet<u32>> {
        self.0.get(&treadle)
    }

    pub fn engages(&self, treadle: u32, shaft: u32) -> bool {
        self.0
            .get(&treadle)
            .map_or(false, |shafts| shafts.contains(&shaft))
    }

    /// Tie a shaft to a treadle. Returns false if it was already tied.
    pub fn tie(&mut self, treadle: u32, shaft: u32) -> bool {
        self.0.entry(treadle).or_default().insert(shaft)
    }

    /// Untie a shaft from a treadle. Returns false if it was not tied.
    ///
    /// A treadle left with no shafts is dropped from the map.
    pub fn untie(&mut self, treadle: u32, shaft: u32) -> bool {
        let Some(shafts) = self.0.get_mut(&treadle) else {
            return false;
        };
        let removed = shafts.remove(&shaft);
        if shafts.is_empty() {
            self.0.remove(&treadle);
        }
        removed
    }

    /// (treadle, shafts) pairs in ascending treadle order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BTreeSet<u32>)> + '_ {
        self.0.iter().map(|(treadle, shafts)| (*treadle, shafts))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop treadles that have no shafts tied
    pub fn without_untied(mut self) -> Self {
        self.0.retain(|_, shafts| !shafts.is_empty());
        self
    }

    pub fn max_treadle(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    pub fn max_shaft(&self) -> Option<u32> {
        self.0
            .values()
            .filter_map(|shafts| shafts.iter().next_back())
            .max()
            .copied()
    }
}

impl FromIterator<(u32, u32)> for Tieup {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut tieup = Tieup::new();
        for (treadle, shaft) in iter {
            tieup.tie(treadle, shaft);
        }
        tieup
    }
}

/// Pick number → treadle number. At most one treadle per pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Treadling(BTreeMap<u32, u32>);

impl Treadling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn treadle(&self, pick: u32) -> Option<u32> {
        self.0.get(&pick).copied()
    }

    pub fn assign(&mut self, pick: u32, treadle: u32) -> Option<u32> {
        self.0.insert(pick, treadle)
    }

    pub fn unassign(&mut self, pick: u32) -> Option<u32> {
        self.0.remove(&pick)
    }

    /// (pick, treadle) pairs in ascending pick order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(pick, treadle)| (*pick, *treadle))
    }

    /// Picks woven with the given treadle
    pub fn picks_using(&self, treadle: u32) -> impl Iterator<Item = u32> + '_ {
        self.iter()
            .filter(move |(_, used)| *used == treadle)
            .map(|(pick, _)| pick)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn max_pick(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    pub fn max_treadle(&self) -> Option<u32> {
        self.0.values().max().copied()
    }
}

impl FromIterator<(u32, u32)> for Treadling {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A weaving draft
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Non-pattern sections, verbatim
    sections: Arc<BTreeMap<String, Section>>,
    threading: Option<Arc<Threading>>,
    tieup: Option<Arc<Tieup>>,
    treadling: Option<Arc<Treadling>>,
}

impl Draft {
    pub(crate) fn from_parts(
        sections: BTreeMap<String, Section>,
        threading: Option<Threading>,
        tieup: Option<Tieup>,
        treadling: Option<Treadling>,
    ) -> Self {
        Self {
            sections: Arc::new(sections),
            threading: threading.map(Arc::new),
            tieup: tieup.map(Arc::new),
            treadling: treadling.map(Arc::new),
        }
    }

    /// A non-pattern section by name (`wif`, `weaving`, `warp`, ...)
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Names of every section present, pattern sections last
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        names.extend(
            PatternKind::ALL
                .into_iter()
                .filter(|kind| self.has_pattern(*kind))
                .map(|kind| -> &str { kind.section_name() }),
        );
        names
    }

    pub fn has_pattern(&self, kind: PatternKind) -> bool {
        match kind {
            PatternKind::Threading => self.threading.is_some(),
            PatternKind::Tieup => self.tieup.is_some(),
            PatternKind::Treadling => self.treadling.is_some(),
        }
    }

    /// WIF format version from `wif.version`
    pub fn version(&self) -> Option<f64> {
        self.field(WIF_SECTION, "version").and_then(Value::as_f64)
    }

    /// `weaving.risingShed`, if declared
    pub fn rising_shed(&self) -> Option<bool> {
        self.field(WEAVING_SECTION, "risingShed")
            .and_then(Value::as_bool)
    }

    pub(crate) fn field(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Threading section (empty when absent)
    pub fn threading(&self) -> &Threading {
        self.threading.as_deref().unwrap_or(&EMPTY_THREADING)
    }

    /// Tieup section (empty when absent)
    pub fn tieup(&self) -> &Tieup {
        self.tieup.as_deref().unwrap_or(&EMPTY_TIEUP)
    }

    /// Treadling section (empty when absent)
    pub fn treadling(&self) -> &Treadling {
        self.treadling.as_deref().unwrap_or(&EMPTY_TREADLING)
    }

    /// New draft with the threading replaced; other sections are shared
    pub fn with_threading(&self, threading: Threading) -> Draft {
        Draft {
            threading: Some(Arc::new(threading)),
            ..self.clone()
        }
    }

    /// New draft with the tieup replaced; other sections are shared
    pub fn with_tieup(&self, tieup: Tieup) -> Draft {
        Draft {
            tieup: Some(Arc::new(tieup)),
            ..self.clone()
        }
    }

    /// New draft with the treadling replaced; other sections are shared
    pub fn with_treadling(&self, treadling: Treadling) -> Draft {
        Draft {
            treadling: Some(Arc::new(treadling)),
            ..self.clone()
        }
    }

    /// True when both drafts hold the very same allocation for a pattern
    /// section (or both lack it)
    pub fn shares_section(&self, other: &Draft, kind: PatternKind) -> bool {
        fn same<T>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }

        match kind {
            PatternKind::Threading => same(&self.threading, &other.threading),
            PatternKind::Tieup => same(&self.tieup, &other.tieup),
            PatternKind::Treadling => same(&self.treadling, &other.treadling),
        }
    }

    /// True when every section is shared with `other`
    pub fn shares_all(&self, other: &Draft) -> bool {
        Arc::ptr_eq(&self.sections, &other.sections)
            && PatternKind::ALL
                .into_iter()
                .all(|kind| self.shares_section(other, kind))
    }
}

impl Serialize for Draft {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut root = serializer.serialize_struct("Draft", 1)?;
        root.serialize_field("sections", &SectionsRef(self))?;
        root.end()
    }
}

struct SectionsRef<'a>(&'a Draft);

impl Serialize for SectionsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let draft = self.0;
        let mut map = serializer.serialize_map(None)?;
        for (name, section) in draft.sections.iter() {
            map.serialize_entry(name, section)?;
        }
        if let Some(threading) = &draft.threading {
            map.serialize_entry(PatternKind::Threading.section_name(), threading.as_ref())?;
        }
        if let Some(tieup) = &draft.tieup {
            map.serialize_entry(PatternKind::Tieup.section_name(), tieup.as_ref())?;
        }
        if let Some(treadling) = &draft.treadling {
            map.serialize_entry(PatternKind::Treadling.section_name(), treadling.as_ref())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Draft {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        crate::ingest::ingest(value).map_err(serde::de::Error::custom)
    }
}
