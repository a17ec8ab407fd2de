//! Static Finnish label tables used by the library spreadsheet import
//!
//! The identifier slugs are stable: they become primary keys of resource
//! types and purposes, so changing one creates a new record on the next run.

use crate::models::Authentication;

/// Space type label (`Tilatyyppi`) -> resource type id
pub const SPACE_TYPES: &[(&str, &str)] = &[
    ("työtila", "workspace"),
    ("työpiste", "workstation"),
    ("tapahtumatila", "event_space"),
    ("studio", "studio"),
    ("näyttelytila", "exhibition_space"),
    ("kokoustila", "meeting_room"),
    ("pelitila", "game_space"),
    ("liikuntatila", "sports_space"),
    ("sali", "hall"),
    ("bändikämppä", "band_practice_space"),
    ("monitoimihuone", "multipurpose_room"),
    ("kerhohuone", "club_room"),
    ("ateljee", "art_studio"),
    ("keittiö", "kitchen"),
];

/// Authentication need label -> authentication level
pub const AUTHENTICATION_LEVELS: &[(&str, Authentication)] = &[
    ("Ei tunnistautumista", Authentication::None),
    ("Kevyt", Authentication::Weak),
    ("Vahva", Authentication::Strong),
];

/// A purpose category and its lowercase label -> purpose id table
#[derive(Debug)]
pub struct PurposeCategory {
    pub id: &'static str,
    pub labels: &'static [(&'static str, &'static str)],
}

/// Purpose categories in lookup order
pub const PURPOSE_CATEGORIES: &[PurposeCategory] = &[
    PurposeCategory {
        id: "audiovisual_work",
        labels: &[
            ("musiikin soitto ja tekeminen", "play_and_record_music"),
            ("äänen käsittely tietokoneella", "edit_sound"),
            ("kuvan käsittely tietokoneella", "edit_image"),
            ("videokuvan käsittely tietokoneella", "edit_video"),
            ("digitointi", "digitizing"),
        ],
    },
    PurposeCategory {
        id: "physical_work",
        labels: &[("fyysisten esineiden tekeminen", "manufacturing")],
    },
    PurposeCategory {
        id: "watch_and_listen",
        labels: &[
            ("(elokuvien) katselu", "watch_video"),
            ("musiikin kuuntelu", "listen_to_music"),
        ],
    },
    PurposeCategory {
        id: "meet_and_work",
        labels: &[
            ("kokoukset tai suljetut tilaisuudet", "private_meetings"),
            ("työskentely ryhmässä tai yksin", "work_in_group_or_alone"),
            ("työskentely yksin", "work_alone"),
            ("tietokoneen käyttäminen", "work_at_computer"),
        ],
    },
    PurposeCategory {
        id: "games",
        labels: &[
            ("konsolipelit", "console_games"),
            (
                "pelaaminen: lauta-, kortti- ja roolipelit",
                "board_card_and_role_playing_games",
            ),
            ("tietokonepelit", "computer_games"),
        ],
    },
    PurposeCategory {
        id: "events_and_exhibitions",
        labels: &[
            ("näyttelyt", "exhibitions"),
            ("yleisötilaisuudet, tapahtumat", "public_events"),
        ],
    },
    PurposeCategory {
        id: "sports",
        labels: &[
            ("tanssi", "dance"),
            ("maila- ja pallopelit", "racket_and_ball_games"),
            ("voimistelu", "gymnastics"),
        ],
    },
];

/// A purpose label resolved against `PURPOSE_CATEGORIES`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurposeMatch {
    pub category: &'static str,
    pub id: &'static str,
}

/// Label that has no entry in a table where one is required
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelLookupError {
    UnknownSpaceType { label: String },
    UnknownAuthentication { label: String },
}

impl std::fmt::Display for LabelLookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelLookupError::UnknownSpaceType { label } => {
                write!(f, "Unknown space type '{}'", label)
            }
            LabelLookupError::UnknownAuthentication { label } => {
                write!(f, "Unknown authentication need '{}'", label)
            }
        }
    }
}

impl std::error::Error for LabelLookupError {}

/// Resource type id for a space type label (exact match)
pub fn resource_type_id(label: &str) -> Result<&'static str, LabelLookupError> {
    SPACE_TYPES
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, id)| *id)
        .ok_or_else(|| LabelLookupError::UnknownSpaceType {
            label: label.to_string(),
        })
}

/// Authentication level for an authentication need label (exact match)
pub fn authentication(label: &str) -> Result<Authentication, LabelLookupError> {
    AUTHENTICATION_LEVELS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, auth)| *auth)
        .ok_or_else(|| LabelLookupError::UnknownAuthentication {
            label: label.to_string(),
        })
}

/// First category whose label table contains the lowercased label
pub fn find_purpose(label: &str) -> Option<PurposeMatch> {
    let label = label.to_lowercase();
    PURPOSE_CATEGORIES.iter().find_map(|category| {
        category
            .labels
            .iter()
            .find(|(key, _)| *key == label)
            .map(|(_, id)| PurposeMatch {
                category: category.id,
                id: *id,
            })
    })
}
