//! The closed set of endpoints reachable from web content.
//!
//! Each namespace ("base") is its own enum; [`Endpoint`] is the tagged
//! union over all of them. Paths look like `card/bury` or
//! `study-screen/get-next-time`.

use std::fmt;

macro_rules! namespace {
    (
        $(#[$meta:meta])*
        $name:ident => $base:literal {
            $($variant:ident($value:literal, $returns:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const BASE: &'static str = $base;

            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The endpoint name within its namespace.
            pub fn value(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn from_value(value: &str) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Whether a successful response carries a `value`.
            pub fn returns_value(self) -> bool {
                match self {
                    $($name::$variant => $returns),+
                }
            }
        }
    };
}

namespace! {
    /// Read or modify a single card.
    CardEndpoint => "card" {
        GetId("get-id", true),
        GetNid("get-nid", true),
        GetDid("get-did", true),
        GetOdid("get-odid", true),
        GetFlag("get-flag", true),
        GetReps("get-reps", true),
        GetLapses("get-lapses", true),
        GetInterval("get-interval", true),
        GetFactor("get-factor", true),
        GetMod("get-mod", true),
        GetType("get-type", true),
        GetQueue("get-queue", true),
        GetDue("get-due", true),
        GetOdue("get-odue", true),
        Bury("bury", false),
        Suspend("suspend", false),
        ResetProgress("reset-progress", false),
        ToggleFlag("toggle-flag", false),
    }
}

namespace! {
    /// Read or modify a note and all of its cards.
    NoteEndpoint => "note" {
        GetId("get-id", true),
        GetNoteTypeId("get-note-type-id", true),
        GetCardIds("get-card-ids", true),
        GetTags("get-tags", true),
        SetTags("set-tags", false),
        IsMarked("is-marked", true),
        ToggleMark("toggle-mark", false),
        Bury("bury", false),
        Suspend("suspend", false),
    }
}

namespace! {
    DeckEndpoint => "deck" {
        GetId("get-id", true),
        GetName("get-name", true),
        IsFiltered("is-filtered", true),
    }
}

namespace! {
    /// Reviewer state and reviewer actions.
    StudyScreenEndpoint => "study-screen" {
        GetNewCount("get-new-count", true),
        GetLearnCount("get-learn-count", true),
        GetReviewCount("get-review-count", true),
        IsShowingAnswer("is-showing-answer", true),
        GetNextTime("get-next-time", true),
        Answer("answer", false),
        ShowAnswer("show-answer", false),
        OpenCardInfo("open-card-info", false),
        OpenNoteEditor("open-note-editor", false),
        Search("search", false),
        SetBackgroundColor("set-background-color", false),
    }
}

namespace! {
    TtsEndpoint => "tts" {
        Speak("speak", false),
        SetLanguage("set-language", true),
        SetPitch("set-pitch", false),
        SetSpeechRate("set-speech-rate", false),
        IsSpeaking("is-speaking", true),
        Stop("stop", false),
    }
}

namespace! {
    /// Device-level queries and notifications.
    AndroidEndpoint => "android" {
        ShowSnackbar("show-snackbar", false),
        IsSystemInDarkMode("is-system-in-dark-mode", true),
        IsNetworkMetered("is-network-metered", true),
    }
}

/// Any endpoint, tagged by namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Card(CardEndpoint),
    Note(NoteEndpoint),
    Deck(DeckEndpoint),
    StudyScreen(StudyScreenEndpoint),
    Tts(TtsEndpoint),
    Android(AndroidEndpoint),
}

impl Endpoint {
    /// Resolve a `"<base>/<value>"` path.
    ///
    /// Only the first `/` separates base from value. Unknown bases and
    /// unknown values within a known base both resolve to `None`.
    pub fn resolve(path: &str) -> Option<Self> {
        let (base, value) = path.split_once('/')?;
        match base {
            CardEndpoint::BASE => CardEndpoint::from_value(value).map(Endpoint::Card),
            NoteEndpoint::BASE => NoteEndpoint::from_value(value).map(Endpoint::Note),
            DeckEndpoint::BASE => DeckEndpoint::from_value(value).map(Endpoint::Deck),
            StudyScreenEndpoint::BASE => {
                StudyScreenEndpoint::from_value(value).map(Endpoint::StudyScreen)
            }
            TtsEndpoint::BASE => TtsEndpoint::from_value(value).map(Endpoint::Tts),
            AndroidEndpoint::BASE => AndroidEndpoint::from_value(value).map(Endpoint::Android),
            _ => None,
        }
    }

    /// Every endpoint, grouped by namespace.
    pub fn all() -> impl Iterator<Item = Endpoint> {
        let card = CardEndpoint::ALL.iter().copied().map(Endpoint::Card);
        let note = NoteEndpoint::ALL.iter().copied().map(Endpoint::Note);
        let deck = DeckEndpoint::ALL.iter().copied().map(Endpoint::Deck);
        let study = StudyScreenEndpoint::ALL
            .iter()
            .copied()
            .map(Endpoint::StudyScreen);
        let tts = TtsEndpoint::ALL.iter().copied().map(Endpoint::Tts);
        let android = AndroidEndpoint::ALL.iter().copied().map(Endpoint::Android);
        card.chain(note)
            .chain(deck)
            .chain(study)
            .chain(tts)
            .chain(android)
    }

    pub fn base(self) -> &'static str {
        match self {
            Endpoint::Card(_) => CardEndpoint::BASE,
            Endpoint::Note(_) => NoteEndpoint::BASE,
            Endpoint::Deck(_) => DeckEndpoint::BASE,
            Endpoint::StudyScreen(_) => StudyScreenEndpoint::BASE,
            Endpoint::Tts(_) => TtsEndpoint::BASE,
            Endpoint::Android(_) => AndroidEndpoint::BASE,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Endpoint::Card(e) => e.value(),
            Endpoint::Note(e) => e.value(),
            Endpoint::Deck(e) => e.value(),
            Endpoint::StudyScreen(e) => e.value(),
            Endpoint::Tts(e) => e.value(),
            Endpoint::Android(e) => e.value(),
        }
    }

    pub fn returns_value(self) -> bool {
        match self {
            Endpoint::Card(e) => e.returns_value(),
            Endpoint::Note(e) => e.returns_value(),
            Endpoint::Deck(e) => e.returns_value(),
            Endpoint::StudyScreen(e) => e.returns_value(),
            Endpoint::Tts(e) => e.returns_value(),
            Endpoint::Android(e) => e.returns_value(),
        }
    }

    /// The `"<base>/<value>"` path this endpoint is reached by.
    pub fn path(self) -> String {
        format!("{}/{}", self.base(), self.value())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(
            Endpoint::resolve("card/bury"),
            Some(Endpoint::Card(CardEndpoint::Bury))
        );
        assert_eq!(
            Endpoint::resolve("study-screen/get-next-time"),
            Some(Endpoint::StudyScreen(StudyScreenEndpoint::GetNextTime))
        );
        assert_eq!(
            Endpoint::resolve("android/is-network-metered"),
            Some(Endpoint::Android(AndroidEndpoint::IsNetworkMetered))
        );
    }

    #[test]
    fn same_value_in_different_namespaces_is_distinct() {
        assert_eq!(
            Endpoint::resolve("card/get-id"),
            Some(Endpoint::Card(CardEndpoint::GetId))
        );
        assert_eq!(
            Endpoint::resolve("note/get-id"),
            Some(Endpoint::Note(NoteEndpoint::GetId))
        );
        assert_eq!(
            Endpoint::resolve("deck/get-id"),
            Some(Endpoint::Deck(DeckEndpoint::GetId))
        );
    }

    #[test]
    fn unknown_base_or_value_is_none() {
        assert_eq!(Endpoint::resolve("scheduler/bury"), None);
        assert_eq!(Endpoint::resolve("card/explode"), None);
        assert_eq!(Endpoint::resolve("card"), None);
        assert_eq!(Endpoint::resolve(""), None);
        assert_eq!(Endpoint::resolve("/card/bury"), None);
        assert_eq!(Endpoint::resolve("CARD/bury"), None);
    }

    #[test]
    fn only_first_slash_splits() {
        // The remainder keeps its slashes, so it never matches a flat value.
        assert_eq!(Endpoint::resolve("card/bury/123"), None);
        assert_eq!(Endpoint::resolve("card/"), None);
    }

    #[test]
    fn every_path_round_trips() {
        for endpoint in Endpoint::all() {
            assert_eq!(Endpoint::resolve(&endpoint.path()), Some(endpoint));
        }
    }

    #[test]
    fn paths_are_unique() {
        let paths: Vec<String> = Endpoint::all().map(Endpoint::path).collect();
        let unique: HashSet<&String> = paths.iter().collect();
        assert_eq!(paths.len(), unique.len());
        assert_eq!(paths.len(), 50);
    }

    #[test]
    fn display_matches_path() {
        let endpoint = Endpoint::Tts(TtsEndpoint::SetSpeechRate);
        assert_eq!(endpoint.to_string(), "tts/set-speech-rate");
        assert_eq!(endpoint.path(), "tts/set-speech-rate");
    }

    #[test]
    fn getters_return_values_and_actions_do_not() {
        assert!(Endpoint::Card(CardEndpoint::GetFlag).returns_value());
        assert!(!Endpoint::Card(CardEndpoint::ToggleFlag).returns_value());
        assert!(Endpoint::Note(NoteEndpoint::IsMarked).returns_value());
        assert!(!Endpoint::StudyScreen(StudyScreenEndpoint::Answer).returns_value());
        assert!(Endpoint::Tts(TtsEndpoint::SetLanguage).returns_value());
    }
}
