//! The radio app's screens.

pub mod menu;

pub use menu::MenuView;

use crate::model::{RootIntent, SettingsIntent, StationListIntent, STATIONS};

pub fn home() -> MenuView {
    MenuView::new("Radio")
        .line("Internet radio, one coordinator per screen.")
        .line("Enter opens, Esc goes back, q quits.")
        .entry(RootIntent::StationList, "Stations", "Browse the station list")
        .entry(RootIntent::Chromecast, "Cast", "Pick a Chromecast device")
        .entry(RootIntent::Settings, "Settings", "Preferences and about")
}

pub fn station_list() -> MenuView {
    let mut view = MenuView::new("Stations");
    for station in STATIONS {
        view = view.line(station.name);
    }
    view.entry(StationListIntent::NowPlaying, "Now playing", "Show the current track")
}

pub fn now_playing() -> MenuView {
    let station = STATIONS[0];
    MenuView::new("Now playing")
        .line(station.name)
        .line(station.genre)
}

pub fn settings() -> MenuView {
    MenuView::new("Settings")
        .entry(SettingsIntent::About, "About", "Version and credits")
        .entry(SettingsIntent::Chromecast, "Cast", "Pick a Chromecast device")
}

pub fn about() -> MenuView {
    MenuView::new("About")
        .line(concat!("navflow-demo ", env!("CARGO_PKG_VERSION")))
        .line("Coordinator-based navigation on a ratatui stack.")
}

pub fn chromecast() -> MenuView {
    MenuView::new("Cast")
        .line("No devices found on this network.")
        .line("Esc closes this dialog.")
}
