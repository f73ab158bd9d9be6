use rand::seq::SliceRandom;

/// The sequence of playlist indices next/previous walk through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOrder {
    indices: Vec<usize>,
}

impl PlayOrder {
    /// Playlist order.
    pub fn sequential(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// A fresh random permutation of the playlist.
    pub fn shuffled(len: usize) -> Self {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut rand::rng());
        Self { indices }
    }

    pub fn for_playlist(len: usize, shuffle: bool) -> Self {
        if shuffle {
            Self::shuffled(len)
        } else {
            Self::sequential(len)
        }
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The index after `current`. Without `wrap` there is nothing after the
    /// last entry. With no current track the walk starts at the first entry.
    pub fn next_after(&self, current: Option<usize>, wrap: bool) -> Option<usize> {
        let first = *self.indices.first()?;
        let Some(pos) = current.and_then(|c| self.indices.iter().position(|&i| i == c)) else {
            return Some(first);
        };
        match self.indices.get(pos + 1) {
            Some(&i) => Some(i),
            None if wrap => Some(first),
            None => None,
        }
    }

    /// The index before `current`, mirroring [`PlayOrder::next_after`]. With
    /// no current track the walk starts at the last entry.
    pub fn previous_before(&self, current: Option<usize>, wrap: bool) -> Option<usize> {
        let last = *self.indices.last()?;
        let Some(pos) = current.and_then(|c| self.indices.iter().position(|&i| i == c)) else {
            return Some(last);
        };
        match pos.checked_sub(1) {
            Some(p) => Some(self.indices[p]),
            None if wrap => Some(last),
            None => None,
        }
    }
}
