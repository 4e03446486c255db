//! Shared test helpers for tapwright-core integration tests.
//!
//! This module provides a scripted [`QueryExecutor`] that serves a fixed
//! screen, reveals extra elements after a number of drags or after some
//! time has passed, and records every call it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use tapwright_core::automator::Automator;
use tapwright_core::config::AutomationConfig;
use tapwright_core::driver::{DriverError, QueryExecutor};
use tapwright_core::element::{MatchSet, Rect, UIElement};
use tapwright_core::selector::Selector;

/// One call received by the scripted executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(Selector),
    Tap(Selector),
    EnterText(Selector, String),
    ClearText,
    DoubleActivate(Selector),
    Drag(f64, f64, f64, f64),
    Screenshot(String),
}

struct State {
    screen: Vec<UIElement>,
    /// Becomes visible once at least this many drags happened.
    below_fold: Vec<(u32, UIElement)>,
    /// Becomes visible once this much time has passed since creation.
    delayed: Vec<(Duration, UIElement)>,
    created: Instant,
    drags: u32,
    fail_taps: bool,
    /// Queries fail until this much time has passed since creation.
    fail_queries_until: Duration,
    calls: Vec<Call>,
}

pub struct ScriptedExecutor {
    state: Mutex<State>,
}

impl ScriptedExecutor {
    pub fn new(screen: Vec<UIElement>) -> Self {
        Self {
            state: Mutex::new(State {
                screen,
                below_fold: Vec::new(),
                delayed: Vec::new(),
                created: Instant::now(),
                drags: 0,
                fail_taps: false,
                fail_queries_until: Duration::ZERO,
                calls: Vec::new(),
            }),
        }
    }

    /// A screen with nothing on it at all.
    pub fn blank() -> Self {
        Self::new(Vec::new())
    }

    pub fn reveal_after_drags(self, drags: u32, element: UIElement) -> Self {
        self.state.lock().unwrap().below_fold.push((drags, element));
        self
    }

    pub fn appear_after(self, delay: Duration, element: UIElement) -> Self {
        self.state.lock().unwrap().delayed.push((delay, element));
        self
    }

    pub fn fail_taps(self) -> Self {
        self.state.lock().unwrap().fail_taps = true;
        self
    }

    pub fn fail_queries_until(self, until: Duration) -> Self {
        self.state.lock().unwrap().fail_queries_until = until;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn drags(&self) -> usize {
        self.count(|c| matches!(c, Call::Drag(..)))
    }

    pub fn taps(&self) -> usize {
        self.count(|c| matches!(c, Call::Tap(_)))
    }

    pub fn queries_for(&self, selector: &Selector) -> usize {
        self.count(|c| *c == Call::Query(selector.clone()))
    }

    pub fn screenshots(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Screenshot(tag) => Some(tag),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn visible_tree(&self) -> Vec<UIElement> {
        let state = self.state.lock().unwrap();
        let elapsed = state.created.elapsed();
        let mut tree = state.screen.clone();
        tree.extend(
            state
                .below_fold
                .iter()
                .filter(|(after, _)| state.drags >= *after)
                .map(|(_, e)| e.clone()),
        );
        tree.extend(
            state
                .delayed
                .iter()
                .filter(|(after, _)| elapsed >= *after)
                .map(|(_, e)| e.clone()),
        );
        tree
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn dump_tree(&self) -> Result<Vec<UIElement>, DriverError> {
        Ok(self.visible_tree())
    }

    async fn query(&self, selector: &Selector) -> Result<MatchSet, DriverError> {
        self.log(Call::Query(selector.clone()));
        {
            let state = self.state.lock().unwrap();
            if state.created.elapsed() < state.fail_queries_until {
                return Err(DriverError::CommandFailed("hierarchy unavailable".to_string()));
            }
        }
        Ok(selector.search(&self.visible_tree()))
    }

    async fn tap(&self, selector: &Selector) -> Result<(), DriverError> {
        self.log(Call::Tap(selector.clone()));
        if self.state.lock().unwrap().fail_taps {
            return Err(DriverError::CommandFailed("tap rejected".to_string()));
        }
        Ok(())
    }

    async fn enter_text(&self, selector: &Selector, text: &str) -> Result<(), DriverError> {
        self.log(Call::EnterText(selector.clone(), text.to_string()));
        Ok(())
    }

    async fn clear_text(&self) -> Result<(), DriverError> {
        self.log(Call::ClearText);
        Ok(())
    }

    async fn double_activate(&self, selector: &Selector) -> Result<(), DriverError> {
        self.log(Call::DoubleActivate(selector.clone()));
        Ok(())
    }

    async fn drag(&self, from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> Result<(), DriverError> {
        self.log(Call::Drag(from_x, from_y, to_x, to_y));
        self.state.lock().unwrap().drags += 1;
        Ok(())
    }

    async fn screenshot(&self, tag: &str) -> Result<(), DriverError> {
        self.log(Call::Screenshot(tag.to_string()));
        Ok(())
    }
}

/// Full-screen root view of the given height, 400 units wide.
pub fn root_view(height: f64) -> UIElement {
    UIElement::new("FrameLayout", Rect::new(0.0, 0.0, 400.0, height)).with_id("content")
}

pub fn button(id: &str, text: &str) -> UIElement {
    UIElement::new("Button", Rect::new(20.0, 100.0, 200.0, 48.0))
        .with_id(id)
        .with_text(text)
}

pub fn text_field(id: &str) -> UIElement {
    UIElement::new("EditText", Rect::new(20.0, 200.0, 360.0, 48.0)).with_id(id)
}

/// Wraps an executor in an automator with default budgets.
pub fn automator(executor: &Arc<ScriptedExecutor>) -> Automator {
    automator_with(executor, AutomationConfig::default())
}

pub fn automator_with(executor: &Arc<ScriptedExecutor>, config: AutomationConfig) -> Automator {
    // Only the first call per test binary installs the subscriber.
    tapwright_core::logging::init_tracing("tapwright_core=debug");
    Automator::with_config(executor.clone(), config)
}
