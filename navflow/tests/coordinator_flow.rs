//! End-to-end navigation through a root coordinator.

use navflow::{
    navigation_intent, AnyCoordinator, Coordinator, FlowResult, HostedScreen, IntentChannel,
    NavigationEventSource, NavigationIntent, NavigationStack, NavigationSurface, Screen, ScreenId,
    SurfaceEvent, View,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};

#[navigation_intent]
enum RootIntent {
    StationList,
    Chromecast,
    Settings,
}

#[navigation_intent]
enum StationListIntent {}

struct MenuView {
    title: &'static str,
    intents: IntentChannel,
}

impl MenuView {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            intents: IntentChannel::new(),
        }
    }
}

impl View for MenuView {
    fn title(&self) -> &str {
        self.title
    }

    fn event_source(&self) -> Option<&dyn NavigationEventSource> {
        Some(&self.intents)
    }
}

type Created = Arc<Mutex<Vec<(ScreenId, &'static str)>>>;

fn station_list_flow(intent: &StationListIntent) -> Option<FlowResult> {
    match *intent {}
}

fn root_flow(
    surface: Arc<dyn NavigationSurface>,
    created: Created,
) -> impl Fn(&RootIntent) -> Option<FlowResult> + Send + Sync + 'static {
    move |intent: &RootIntent| {
        let title = match intent {
            RootIntent::StationList => "Stations",
            RootIntent::Chromecast => "Chromecast",
            RootIntent::Settings => return None,
        };
        let screen = HostedScreen::new(MenuView::new(title));
        let child: Coordinator<StationListIntent> =
            Coordinator::new(&screen, Some(surface.clone()), station_list_flow);
        created.lock().unwrap().push((screen.id(), title));
        Some(match intent {
            RootIntent::Chromecast => FlowResult::present(child, &screen),
            _ => FlowResult::push(child, &screen),
        })
    }
}

struct App {
    home: Arc<HostedScreen<MenuView>>,
    stack: Arc<NavigationStack>,
    root: Coordinator<RootIntent>,
    created: Created,
}

fn app() -> App {
    let home = HostedScreen::new(MenuView::new("Home"));
    let stack = Arc::new(NavigationStack::new(home.display_unit()));
    let surface: Arc<dyn NavigationSurface> = stack.clone();
    let created = Created::default();
    let root: Coordinator<RootIntent> =
        Coordinator::new(&home, Some(surface.clone()), root_flow(surface, created.clone()));
    App {
        home,
        stack,
        root,
        created,
    }
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<SurfaceEvent>) -> SurfaceEvent {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for a surface event")
        .expect("surface closed")
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn station_list_is_pushed_then_evicted_by_back_gesture() {
    let app = app();
    let mut events = app.stack.subscribe();

    app.home.view().intents.emit(RootIntent::StationList);

    let pushed = match next_event(&mut events).await {
        SurfaceEvent::DidShow(show) => show.shown,
        other => panic!("expected a push, got {other:?}"),
    };
    let (station_id, title) = app.created.lock().unwrap()[0];
    assert_eq!(title, "Stations");
    assert_eq!(pushed.screen_id(), Some(station_id));
    assert_eq!(app.root.child_ids(), vec![station_id]);
    assert!(app.stack.presented().is_empty());
    assert_eq!(app.stack.depth(), 2);

    let mut changes = app.root.watch_children();
    app.stack.pop();
    assert!(matches!(next_event(&mut events).await, SurfaceEvent::DidShow(_)));
    tokio::time::timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("registry did not change")
        .unwrap();

    assert!(app.root.child_ids().is_empty());
    settle().await;
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn chromecast_is_presented_and_settings_is_ignored() {
    let app = app();
    let mut events = app.stack.subscribe();

    app.home.view().intents.emit(RootIntent::Settings);
    app.home.view().intents.emit(RootIntent::Chromecast);

    assert!(matches!(next_event(&mut events).await, SurfaceEvent::Presented(_)));
    assert_eq!(app.created.lock().unwrap().len(), 1);
    assert_eq!(app.root.child_count(), 1);
    assert_eq!(app.stack.depth(), 1);

    let mut changes = app.root.watch_children();
    app.stack.dismiss();
    tokio::time::timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("registry did not change")
        .unwrap();
    assert_eq!(app.root.child_count(), 0);
}

#[tokio::test]
async fn root_flow_is_total_and_deterministic() {
    let home = HostedScreen::new(MenuView::new("Home"));
    let stack = Arc::new(NavigationStack::new(home.display_unit()));
    let created = Created::default();
    let flow = root_flow(stack, created);

    for intent in RootIntent::ALL {
        let first = flow(intent).map(|result| result.transition.is_modal());
        let second = flow(intent).map(|result| result.transition.is_modal());
        assert_eq!(first, second, "{intent} resolved differently");
    }
    assert!(StationListIntent::ALL.is_empty());
}

#[tokio::test]
async fn popping_a_deep_stack_evicts_every_child() {
    let app = app();
    let mut events = app.stack.subscribe();

    for _ in 0..64 {
        app.home.view().intents.emit(RootIntent::StationList);
    }
    for _ in 0..64 {
        assert!(matches!(next_event(&mut events).await, SurfaceEvent::DidShow(_)));
    }
    assert_eq!(app.stack.depth(), 65);
    assert_eq!(app.root.child_count(), 64);

    assert_eq!(app.stack.pop_to_root().len(), 64);
    for _ in 0..64 {
        assert!(matches!(next_event(&mut events).await, SurfaceEvent::DidShow(_)));
    }
    tokio::time::timeout(Duration::from_secs(2), async {
        while app.root.child_count() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("children outlived their screens");
    assert_eq!(app.stack.depth(), 1);
}

#[tokio::test]
async fn dropping_the_root_tears_down_the_tree() {
    let app = app();
    let mut changes = app.root.watch_children();

    app.home.view().intents.emit(RootIntent::StationList);
    tokio::time::timeout(Duration::from_secs(1), changes.changed())
        .await
        .expect("registry did not change")
        .unwrap();

    let App { home, stack, root, .. } = app;
    drop(root);
    settle().await;

    assert_eq!(home.view().intents.subscriber_count(), 0);
    home.view().intents.emit(RootIntent::StationList);
    settle().await;
    assert_eq!(stack.depth(), 2);
}
