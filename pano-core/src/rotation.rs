//! Dwell-based content rotation
//!
//! A playlist of short canned strings shown one per dwell interval, plus
//! the cycle counter that decides when the showcase moves on to its next
//! outer mode.

use heapless::{String, Vec};

use crate::render::truncated;
use crate::time::{Cadence, Millis};

/// Most entries in a playlist
pub const MAX_PLAYLIST: usize = 8;

/// Longest playlist entry
pub const MAX_ENTRY_LEN: usize = 16;

/// Default dwell interval
pub const DEFAULT_DWELL_MS: u32 = 3000;

/// Default dwell intervals spent in each outer mode
pub const DEFAULT_CYCLES_PER_MODE: u8 = 5;

/// One playlist entry
pub type Entry = String<MAX_ENTRY_LEN>;

/// Ordered canned strings
pub type Playlist = Vec<Entry, MAX_PLAYLIST>;

/// Build a playlist from string slices, dropping entries beyond capacity
pub fn playlist(entries: &[&str]) -> Playlist {
    entries
        .iter()
        .take(MAX_PLAYLIST)
        .map(|entry| truncated(entry))
        .collect()
}

/// Rotation cursor and dwell bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationState {
    entries: Playlist,
    /// Index of the entry shown at the next dwell boundary
    cursor: usize,
    dwell: Cadence,
    /// Set once the first entry has been handed out
    started: bool,
    /// Dwell boundaries counted in the current outer mode
    cycles: u8,
    cycles_per_mode: u8,
}

impl RotationState {
    /// Create a rotation whose first dwell interval starts at `start`
    pub fn new(entries: Playlist, dwell_ms: u32, cycles_per_mode: u8, start: Millis) -> Self {
        Self {
            entries,
            cursor: 0,
            started: false,
            dwell: Cadence::new(dwell_ms, start),
            cycles: 0,
            cycles_per_mode: cycles_per_mode.max(1),
        }
    }

    /// True once per dwell interval
    pub fn dwell_elapsed(&mut self, now: Millis) -> bool {
        self.dwell.poll(now)
    }

    /// Entry to show now; moves the cursor on, round-robin
    pub fn next_entry(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let shown = self.cursor;
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.started = true;
        Some(self.entries[shown].as_str())
    }

    /// Count one dwell boundary; true when the outer mode should advance
    pub fn complete_cycle(&mut self) -> bool {
        self.cycles = self.cycles.saturating_add(1);
        if self.cycles >= self.cycles_per_mode {
            self.cycles = 0;
            true
        } else {
            false
        }
    }

    /// Entry the next boundary will show
    pub fn upcoming(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(|entry| entry.as_str())
    }

    /// Entry most recently shown, if any has been yet
    pub fn last_shown(&self) -> Option<&str> {
        if !self.started || self.entries.is_empty() {
            return None;
        }
        let len = self.entries.len();
        let index = (self.cursor + len - 1) % len;
        Some(self.entries[index].as_str())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dwell_ms(&self) -> u32 {
        self.dwell.interval_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation() -> RotationState {
        RotationState::new(
            playlist(&["MERHABA", "DUNYA!", "P10 LED"]),
            DEFAULT_DWELL_MS,
            DEFAULT_CYCLES_PER_MODE,
            Millis::ZERO,
        )
    }

    #[test]
    fn test_round_robin_cursor() {
        let mut rotation = rotation();
        assert_eq!(rotation.next_entry(), Some("MERHABA"));
        assert_eq!(rotation.next_entry(), Some("DUNYA!"));
        assert_eq!(rotation.next_entry(), Some("P10 LED"));
        assert_eq!(rotation.next_entry(), Some("MERHABA"));
        assert_eq!(rotation.last_shown(), Some("MERHABA"));
        assert_eq!(rotation.upcoming(), Some("DUNYA!"));
    }

    #[test]
    fn test_nothing_shown_before_first_entry() {
        let mut rotation = rotation();
        assert_eq!(rotation.last_shown(), None);
        assert_eq!(rotation.upcoming(), Some("MERHABA"));

        rotation.next_entry();
        assert_eq!(rotation.last_shown(), Some("MERHABA"));
    }

    #[test]
    fn test_empty_playlist() {
        let mut rotation = RotationState::new(Playlist::new(), 3000, 5, Millis::ZERO);
        assert_eq!(rotation.next_entry(), None);
        assert_eq!(rotation.last_shown(), None);
    }

    #[test]
    fn test_cycle_counter_fires_every_n() {
        let mut rotation = rotation();
        let fired: heapless::Vec<bool, 10> =
            (0..10).map(|_| rotation.complete_cycle()).collect();
        assert_eq!(
            fired.as_slice(),
            &[false, false, false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_dwell_boundaries() {
        let mut rotation = rotation();
        assert!(!rotation.dwell_elapsed(Millis::new(2990)));
        assert!(rotation.dwell_elapsed(Millis::new(3000)));
        assert!(!rotation.dwell_elapsed(Millis::new(5990)));
        assert!(rotation.dwell_elapsed(Millis::new(6000)));
    }

    #[test]
    fn test_playlist_truncates_long_entries() {
        let list = playlist(&["A VERY LONG CANNED STRING"]);
        assert_eq!(list[0].len(), MAX_ENTRY_LEN);
    }
}
