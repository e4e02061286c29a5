//! Navigation intents of the radio app, one closed set per screen family.

use navflow::navigation_intent;

/// Home screen.
#[navigation_intent]
pub enum RootIntent {
    StationList,
    Chromecast,
    Settings,
}

#[navigation_intent]
pub enum StationListIntent {
    NowPlaying,
}

#[navigation_intent]
pub enum SettingsIntent {
    About,
    Chromecast,
}

/// Screens below have nowhere further to go.
#[navigation_intent]
pub enum NowPlayingIntent {}

#[navigation_intent]
pub enum AboutIntent {}

#[navigation_intent]
pub enum ChromecastIntent {}

/// A station shown on the station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    pub name: &'static str,
    pub genre: &'static str,
}

pub const STATIONS: &[Station] = &[
    Station { name: "Radio Paradise", genre: "Eclectic" },
    Station { name: "KEXP", genre: "Indie" },
    Station { name: "FIP", genre: "Jazz / World" },
    Station { name: "SomaFM Groove Salad", genre: "Ambient" },
];
