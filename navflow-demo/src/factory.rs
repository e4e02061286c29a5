//! Builds every coordinator of the radio app and decides where each intent leads.

use crate::model::{
    AboutIntent, ChromecastIntent, NowPlayingIntent, RootIntent, SettingsIntent, StationListIntent,
};
use crate::pages::{self, MenuView};
use navflow::{
    Coordinator, CoordinatorConfig, FlowResult, HostedScreen, NavigationIntent, NavigationSurface,
    Screen,
};
use std::sync::Arc;

type Flow<I> = fn(&Factory, &I) -> Option<FlowResult>;

/// Everything a flow needs to build the next screen and its coordinator.
#[derive(Clone)]
pub struct Factory {
    surface: Arc<dyn NavigationSurface>,
    config: CoordinatorConfig,
}

impl Factory {
    pub fn new(surface: Arc<dyn NavigationSurface>, config: CoordinatorConfig) -> Self {
        Self { surface, config }
    }

    pub fn home_screen() -> Arc<HostedScreen<MenuView>> {
        HostedScreen::new(pages::home())
    }

    pub fn root_coordinator(&self, home: &Arc<HostedScreen<MenuView>>) -> Coordinator<RootIntent> {
        self.coordinator(home, root_flow)
    }

    fn coordinator<I: NavigationIntent>(&self, screen: &dyn Screen, flow: Flow<I>) -> Coordinator<I> {
        let factory = self.clone();
        Coordinator::with_config(
            screen,
            Some(Arc::clone(&self.surface)),
            move |intent: &I| flow(&factory, intent),
            &self.config,
        )
    }

    fn push<I: NavigationIntent>(&self, view: MenuView, flow: Flow<I>) -> FlowResult {
        let screen = HostedScreen::new(view);
        FlowResult::push(self.coordinator(&screen, flow), &screen)
    }

    fn present<I: NavigationIntent>(&self, view: MenuView, flow: Flow<I>) -> FlowResult {
        let screen = HostedScreen::new(view);
        FlowResult::present(self.coordinator(&screen, flow), &screen)
    }
}

fn root_flow(factory: &Factory, intent: &RootIntent) -> Option<FlowResult> {
    Some(match intent {
        RootIntent::StationList => factory.push(pages::station_list(), station_list_flow),
        RootIntent::Chromecast => factory.present(pages::chromecast(), chromecast_flow),
        RootIntent::Settings => factory.push(pages::settings(), settings_flow),
    })
}

fn station_list_flow(factory: &Factory, intent: &StationListIntent) -> Option<FlowResult> {
    match intent {
        StationListIntent::NowPlaying => Some(factory.push(pages::now_playing(), now_playing_flow)),
    }
}

fn settings_flow(factory: &Factory, intent: &SettingsIntent) -> Option<FlowResult> {
    Some(match intent {
        SettingsIntent::About => factory.push(pages::about(), about_flow),
        SettingsIntent::Chromecast => factory.present(pages::chromecast(), chromecast_flow),
    })
}

fn now_playing_flow(_: &Factory, intent: &NowPlayingIntent) -> Option<FlowResult> {
    match *intent {}
}

fn about_flow(_: &Factory, intent: &AboutIntent) -> Option<FlowResult> {
    match *intent {}
}

fn chromecast_flow(_: &Factory, intent: &ChromecastIntent) -> Option<FlowResult> {
    match *intent {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use navflow::{AnyCoordinator, DisplayUnit, NavigationStack, SurfaceEvent};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct App {
        home: Arc<HostedScreen<MenuView>>,
        stack: Arc<NavigationStack>,
        root: Coordinator<RootIntent>,
    }

    fn app() -> App {
        let home = Factory::home_screen();
        let stack = Arc::new(NavigationStack::new(home.display_unit()));
        let factory = Factory::new(stack.clone(), CoordinatorConfig::default());
        let root = factory.root_coordinator(&home);
        App { home, stack, root }
    }

    fn top_menu(stack: &NavigationStack) -> Arc<dyn DisplayUnit> {
        stack.top().expect("stack is never empty")
    }

    async fn wait_for(mut done: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !done() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition never held");
    }

    #[tokio::test]
    async fn test_flows_pick_expected_transitions() {
        let app = app();
        let factory = Factory::new(app.stack.clone(), CoordinatorConfig::default());

        let root: Vec<_> = RootIntent::ALL
            .iter()
            .map(|intent| root_flow(&factory, intent).map(|r| r.transition.is_modal()))
            .collect();
        assert_eq!(root, vec![Some(false), Some(true), Some(false)]);

        let settings: Vec<_> = SettingsIntent::ALL
            .iter()
            .map(|intent| settings_flow(&factory, intent).map(|r| r.transition.is_modal()))
            .collect();
        assert_eq!(settings, vec![Some(false), Some(true)]);

        let stations = station_list_flow(&factory, &StationListIntent::NowPlaying);
        assert_eq!(stations.map(|r| r.transition.is_modal()), Some(false));
    }

    #[tokio::test]
    async fn test_menu_activation_drives_the_stack() {
        let app = app();
        let mut events = app.stack.subscribe();

        assert!(app.home.view().activate());
        assert!(matches!(events.recv().await, Some(SurfaceEvent::DidShow(_))));
        assert_eq!(app.stack.depth(), 2);
        assert_eq!(app.root.child_count(), 1);

        let top = top_menu(&app.stack);
        let stations = top
            .as_any()
            .downcast_ref::<HostedScreen<MenuView>>()
            .expect("station list is a menu");
        assert_eq!(stations.view().entries().len(), 1);
        assert!(stations.view().activate());
        assert!(matches!(events.recv().await, Some(SurfaceEvent::DidShow(_))));
        assert_eq!(app.stack.depth(), 3);

        app.stack.pop_to_root();
        let root = &app.root;
        wait_for(|| root.child_count() == 0).await;
        assert_eq!(app.stack.depth(), 1);
    }

    #[tokio::test]
    async fn test_cast_dialog_is_modal() {
        let app = app();
        let mut events = app.stack.subscribe();

        app.home.view().select_next();
        assert!(app.home.view().activate());
        assert!(matches!(events.recv().await, Some(SurfaceEvent::Presented(_))));
        assert_eq!(app.stack.presented().len(), 1);
        assert_eq!(app.stack.depth(), 1);

        app.stack.dismiss();
        let root = &app.root;
        wait_for(|| root.child_count() == 0).await;
    }
}
