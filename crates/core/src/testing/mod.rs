//! Testing utilities and a mock tool for exercising runs without get_iplayer.

mod mock_tool;

pub use mock_tool::MockMediaTool;

/// Test fixtures and helper functions.
pub mod fixtures {
    /// Banner lines get_iplayer prints before the listing.
    pub const LISTING_HEADER: [&str; 6] = [
        "get_iplayer v3.31, Copyright (C) 2008-2010 Phil Lewis",
        "  This program comes with ABSOLUTELY NO WARRANTY; for details use --warranty.",
        "  This is free software, and you are welcome to redistribute it under certain",
        "  conditions; use --conditions for details.",
        "",
        "Matches:",
    ];

    /// Summary lines get_iplayer prints after the listing.
    pub const LISTING_FOOTER: [&str; 2] = [
        "",
        "INFO: 3 matching radio programmes",
    ];

    /// Builds a listing snapshot with the usual banner and summary around `entries`.
    pub fn listing_with_entries(entries: &[&str]) -> String {
        LISTING_HEADER
            .iter()
            .chain(entries)
            .chain(LISTING_FOOTER.iter())
            .map(|line| format!("{}\n", line))
            .collect()
    }

    /// Builds history file text containing `pids`.
    pub fn history_with_pids(pids: &[&str]) -> String {
        pids.iter()
            .map(|pid| format!("{}|Some Programme|Some Episode|radio|1700000000|||", pid))
            .collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::history::HistorySet;

        #[test]
        fn test_listing_with_entries_layout() {
            let text = listing_with_entries(&["pid1,Show,Ep"]);
            let lines: Vec<_> = text.lines().collect();
            assert_eq!(lines.len(), 9);
            assert_eq!(lines[6], "pid1,Show,Ep");
        }

        #[test]
        fn test_history_with_pids_parses() {
            let history = HistorySet::parse(&history_with_pids(&["pid1", "pid2"]));
            assert!(history.contains("pid1"));
            assert!(history.contains("pid2"));
            assert_eq!(history.len(), 2);
        }
    }
}
