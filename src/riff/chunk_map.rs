// Ordered chunk map keyed by chunk id

use super::chunk::ChunkRecord;
use super::RIFF_HEADER_SIZE;
use serde::Serialize;
use std::collections::HashMap;

/// Chunk id of the format chunk
pub const FMT_CHUNK_ID: &str = "fmt ";

/// Chunk id of the audio payload
pub const DATA_CHUNK_ID: &str = "data";

/// Size and position of one chunk, as reported by `list_chunks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    pub id: String,
    pub size: u32,
    pub offset: usize,
}

/// Chunks keyed by id, in the order each id was first seen.
///
/// Inserting an id that is already present replaces the stored record in
/// place, so a later duplicate in the file wins but keeps the position of
/// the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMap {
    records: Vec<ChunkRecord>,
    index: HashMap<String, usize>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, record: ChunkRecord) -> Option<ChunkRecord> {
        match self.index.get(record.id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.id().to_string(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChunkRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Chunk ids in map order
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkRecord> + '_ {
        self.records.iter()
    }

    /// id, size and offset of every chunk in map order
    pub fn summaries(&self) -> Vec<ChunkSummary> {
        self.records
            .iter()
            .map(|r| ChunkSummary {
                id: r.id().to_string(),
                size: r.size(),
                offset: r.offset(),
            })
            .collect()
    }

    /// Order used when writing a WAVE file: `fmt `, `data`, then the rest
    /// in map order
    pub fn write_order(&self) -> impl Iterator<Item = &ChunkRecord> + Clone + '_ {
        self.write_slots().map(move |slot| &self.records[slot])
    }

    fn write_slots(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        let fmt = self.index.get(FMT_CHUNK_ID).copied();
        let data = self.index.get(DATA_CHUNK_ID).copied();
        let rest = (0..self.records.len())
            .filter(move |&slot| !is_leading(self.records[slot].id()));
        fmt.into_iter().chain(data).chain(rest)
    }

    /// Reassign offsets to match the layout `write_order` produces
    pub fn relayout(&mut self) {
        let mut offsets = vec![0; self.records.len()];
        let mut position = RIFF_HEADER_SIZE;
        for slot in self.write_slots() {
            offsets[slot] = position;
            position += self.records[slot].padded_len();
        }

        let records = std::mem::take(&mut self.records);
        self.records = records
            .into_iter()
            .zip(offsets)
            .map(|(record, offset)| record.at_offset(offset))
            .collect();
    }
}

fn is_leading(id: &str) -> bool {
    id == FMT_CHUNK_ID || id == DATA_CHUNK_ID
}

impl<'a> IntoIterator for &'a ChunkMap {
    type Item = &'a ChunkRecord;
    type IntoIter = std::slice::Iter<'a, ChunkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str, len: usize, offset: usize) -> ChunkRecord {
        ChunkRecord::new(id, vec![0xAB; len], offset).unwrap()
    }

    #[test]
    fn duplicate_id_keeps_first_position_and_last_body() {
        let mut map = ChunkMap::new();
        assert!(map.insert(record("fmt ", 16, 12)).is_none());
        assert!(map.insert(record("LIST", 4, 36)).is_none());
        let replaced = map.insert(record("fmt ", 18, 48)).unwrap();

        assert_eq!(replaced.size(), 16);
        assert_eq!(map.len(), 2);
        assert_eq!(map.ids().collect::<Vec<_>>(), vec!["fmt ", "LIST"]);
        assert_eq!(map.get("fmt ").unwrap().size(), 18);
        assert_eq!(map.get("fmt ").unwrap().offset(), 48);
    }

    #[test]
    fn many_distinct_ids_stay_indexed() {
        let mut map = ChunkMap::new();
        for n in 0..20_000u32 {
            let id = format!("{:04}", n % 10_000);
            map.insert(ChunkRecord::new(&id, Vec::new(), 12 + n as usize * 8).unwrap());
        }

        assert_eq!(map.len(), 10_000);
        assert_eq!(map.get("0042").unwrap().offset(), 12 + 10_042 * 8);
        assert!(map.contains("9999"));
        assert!(!map.contains("abcd"));
    }

    #[test]
    fn write_order_puts_fmt_and_data_first() {
        let mut map = ChunkMap::new();
        map.insert(record("LIST", 4, 12));
        map.insert(record("data", 4, 24));
        map.insert(record("cue ", 4, 36));
        map.insert(record("fmt ", 16, 48));

        let order: Vec<_> = map.write_order().map(|r| r.id()).collect();
        assert_eq!(order, vec!["fmt ", "data", "LIST", "cue "]);
    }

    #[test]
    fn relayout_follows_write_order() {
        let mut map = ChunkMap::new();
        map.insert(record("INFO", 15, 100));
        map.insert(record("fmt ", 16, 200));
        map.insert(record("data", 4, 300));

        map.relayout();

        assert_eq!(
            map.summaries(),
            vec![
                ChunkSummary { id: "INFO".into(), size: 15, offset: 12 + 24 + 12 },
                ChunkSummary { id: "fmt ".into(), size: 16, offset: 12 },
                ChunkSummary { id: "data".into(), size: 4, offset: 12 + 24 },
            ]
        );
    }
}
