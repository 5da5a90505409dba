//! Catalogue entry parsing.

/// Marker get_iplayer puts in front of programmes it has not listed before.
pub const ADDED_MARKER: &str = "Added: ";

/// One programme from the listing snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    /// Programme id, used as the deduplication key.
    pub pid: String,
    /// Programme (series) name.
    pub name: String,
    /// Episode label.
    pub episode: String,
}

impl CatalogueEntry {
    /// Parses a cleaned listing line of the form `pid,name,episode[,...]`.
    ///
    /// Returns `None` when there are fewer than three fields or the pid is
    /// empty. Fields past the third are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split(',');
        let pid = fields.next()?;
        let name = fields.next()?;
        let episode = fields.next()?;

        if pid.is_empty() {
            return None;
        }

        Some(Self {
            pid: pid.to_string(),
            name: name.to_string(),
            episode: episode.to_string(),
        })
    }

    /// Case-sensitive substring match against name or episode.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.episode.contains(keyword)
    }
}

/// Trims a raw snapshot line and drops a leading [`ADDED_MARKER`].
pub fn clean_line(raw: &str) -> &str {
    let line = raw.trim();
    match line.strip_prefix(ADDED_MARKER) {
        Some(rest) => rest.trim(),
        None => line,
    }
}
