//! App actor - message loop processing UI events and network responses

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::session::SessionProvider;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    session: Arc<dyn SessionProvider>,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        session: Arc<dyn SessionProvider>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            session,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let mounted = self.state.mount(self.session.as_ref());
        self.send(mounted);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus navigation
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Expense list
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::DeleteSelected => {
                let cmd = self.state.delete_selected();
                self.send(cmd);
            }
            UiEvent::Refresh => {
                let cmd = self.state.fetch_expenses();
                self.send(cmd);
            }

            // Form
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                let cmd = self.state.submit();
                self.send(cmd);
            }
            UiEvent::CancelEdit => self.state.cancel_edit(),

            // Popups
            UiEvent::DismissAlert => self.state.dismiss_alert(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::Screen;
    use crate::models::{Expense, ExpenseId, ExpensePayload, FormMode};
    use crate::network::fake::{Call, Endpoint, FakeExpenseApi};
    use crate::network::{ApiRef, NetworkActor};
    use crate::session::MemorySession;
    use std::time::Duration;

    struct Harness {
        fake: Arc<FakeExpenseApi>,
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
    }

    impl Harness {
        fn start(fake: FakeExpenseApi, session: MemorySession) -> Self {
            let fake = Arc::new(fake);
            let api: ApiRef = fake.clone();
            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
            let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
            let (render_tx, render_rx) = mpsc::unbounded_channel();

            tokio::spawn(NetworkActor::new(api, net_resp_tx).run(net_cmd_rx));
            let actor = AppActor::new(AppState::new(), Arc::new(session), net_cmd_tx, render_tx);
            tokio::spawn(actor.run(ui_rx, net_resp_rx));

            Harness { fake, ui_tx, render_rx }
        }

        fn send(&self, events: &[UiEvent]) {
            for event in events {
                self.ui_tx.send(event.clone()).unwrap();
            }
        }

        fn type_text(&self, text: &str) {
            for c in text.chars() {
                self.ui_tx.send(UiEvent::CharInput(c)).unwrap();
            }
        }

        /// Wait for a render state matching `pred`
        async fn wait_for(&mut self, pred: impl Fn(&RenderState) -> bool) -> RenderState {
            tokio::time::timeout(Duration::from_secs(2), async {
                loop {
                    let state = self.render_rx.recv().await.expect("app actor stopped");
                    if pred(&state) {
                        return state;
                    }
                }
            })
            .await
            .expect("timed out waiting for render state")
        }

        /// Wait until the app has no request in flight
        async fn settle(&mut self) -> RenderState {
            self.wait_for(|s| !s.is_loading).await
        }
    }

    fn sample() -> Vec<Expense> {
        vec![Expense::new(1, "Groceries", 10.0), Expense::new(2, "Bus", 2.5)]
    }

    #[tokio::test]
    async fn test_no_token_redirects_without_fetch() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::empty());
        let state = h.wait_for(|s| s.screen == Screen::Login).await;
        assert!(state.expenses.is_empty());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(h.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mount_fetches_with_bearer_token() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::with_token("jwt"));
        let state = h.wait_for(|s| s.expenses.len() == 2).await;
        assert_eq!(state.total, "12.50");
        assert_eq!(h.fake.calls(), vec![Call::List { token: "jwt".into() }]);
    }

    #[tokio::test]
    async fn test_create_flow_round_trips_through_backend() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::StartEditing]);
        h.type_text("Lunch");
        h.send(&[UiEvent::NextField, UiEvent::StartEditing]);
        h.type_text("7.5");
        h.send(&[UiEvent::Submit]);

        let state = h.wait_for(|s| s.expenses.len() == 3).await;
        assert!(state.title.is_empty());
        assert!(state.amount.is_empty());
        assert_eq!(state.total, "20.00");
        assert!(h.fake.calls().contains(&Call::Create {
            token: "jwt".into(),
            payload: ExpensePayload { title: "Lunch".into(), amount: 7.5 },
        }));
    }

    #[tokio::test]
    async fn test_incomplete_draft_alerts_without_request() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::Submit]);
        let state = h.wait_for(|s| s.alert.is_some()).await;
        assert_eq!(state.alert.as_deref(), Some("Enter title and amount"));
        assert_eq!(h.fake.calls().len(), 1);

        h.send(&[UiEvent::DismissAlert]);
        h.wait_for(|s| s.alert.is_none()).await;
    }

    #[tokio::test]
    async fn test_edit_flow_updates_selected_expense() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::NextField, UiEvent::NextField, UiEvent::SelectNext, UiEvent::EditSelected]);
        let state = h.wait_for(|s| s.mode == FormMode::Editing(ExpenseId(2))).await;
        assert_eq!(state.title, "Bus");

        h.send(&[UiEvent::PrevField, UiEvent::StartEditing, UiEvent::Backspace]);
        h.type_text("0");
        h.send(&[UiEvent::Submit]);

        let state = h
            .wait_for(|s| s.mode == FormMode::Creating && s.expenses.iter().any(|e| e.amount == 2.0))
            .await;
        assert_eq!(state.total, "12.00");
        assert!(h.fake.calls().iter().any(|c| matches!(c, Call::Update { id: ExpenseId(2), .. })));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_record() {
        let fake = FakeExpenseApi::with_expenses(sample());
        fake.fail(Endpoint::Delete);
        let mut h = Harness::start(fake, MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::NextField, UiEvent::NextField, UiEvent::DeleteSelected]);
        h.wait_for(|s| s.is_loading).await;
        let state = h.settle().await;
        assert_eq!(state.expenses.len(), 2);
        let deletes = h.fake.calls().iter().filter(|c| matches!(c, Call::Delete { .. })).count();
        assert_eq!(deletes, 1);
        // No re-fetch after the failure
        let lists = h.fake.calls().iter().filter(|c| matches!(c, Call::List { .. })).count();
        assert_eq!(lists, 1);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_draft() {
        let fake = FakeExpenseApi::with_expenses(sample());
        fake.fail(Endpoint::Create);
        let mut h = Harness::start(fake, MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::StartEditing]);
        h.type_text("Lunch");
        h.send(&[UiEvent::NextField, UiEvent::StartEditing]);
        h.type_text("5");
        h.send(&[UiEvent::Submit]);

        h.wait_for(|s| s.is_loading).await;
        let state = h.settle().await;
        assert_eq!(state.title, "Lunch");
        assert_eq!(state.amount, "5");
        assert_eq!(state.mode, FormMode::Creating);
        assert_eq!(state.expenses.len(), 2);
        let creates = h.fake.calls().iter().filter(|c| matches!(c, Call::Create { .. })).count();
        assert_eq!(creates, 1);
    }

    #[tokio::test]
    async fn test_delete_refetches() {
        let mut h = Harness::start(FakeExpenseApi::with_expenses(sample()), MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.send(&[UiEvent::NextField, UiEvent::NextField, UiEvent::DeleteSelected]);
        let state = h.wait_for(|s| s.expenses.len() == 1).await;
        assert_eq!(state.expenses[0].title, "Bus");
        assert_eq!(state.total, "2.50");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let fake = FakeExpenseApi::with_expenses(sample());
        let mut h = Harness::start(fake, MemorySession::with_token("jwt"));
        h.wait_for(|s| s.expenses.len() == 2).await;

        h.fake.fail(Endpoint::List);
        h.send(&[UiEvent::Refresh]);
        h.wait_for(|s| s.is_loading).await;
        let state = h.settle().await;
        assert_eq!(state.expenses, sample());
    }
}
