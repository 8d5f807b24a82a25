//! Dialog State Machine
//!
//! The single authority for what happens to a line of text. Menu commands
//! always win and abandon any flow in progress; otherwise the pending
//! step's validator decides between a re-prompt, the next prompt, or the
//! flow's terminal action.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{Flow, StepDefinition, StepId, Transition, action};
use crate::chunk;
use crate::config::DialogConfig;
use crate::error::{BotError, Result};
use crate::gateway::{AnalyticsGateway, ChartImage, FlowResult};
use crate::menu::{self, Command, MenuId};
use crate::messages;
use crate::reply::{ChartArtifact, Reply};
use crate::session::{Session, SessionStore, UserId};

/// One message from the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Incoming {
    pub user: UserId,
    pub text: String,

    /// Used to greet the user on `/start`
    pub first_name: Option<String>,
}

impl Incoming {
    pub fn new(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: UserId::from_string(user),
            text: text.into(),
            first_name: None,
        }
    }

    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }
}

/// The dialog engine shared by every connection
pub struct Dialog {
    sessions: SessionStore,
    gateway: Arc<dyn AnalyticsGateway>,
    config: DialogConfig,
}

impl Dialog {
    pub fn new(gateway: Arc<dyn AnalyticsGateway>, config: DialogConfig) -> Self {
        Self {
            sessions: SessionStore::new(),
            gateway,
            config,
        }
    }

    pub fn builder() -> DialogBuilder {
        DialogBuilder::new()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Handle one incoming message and return the replies, in send order
    pub async fn handle(&self, incoming: &Incoming) -> Vec<Reply> {
        let handle = self.sessions.get_or_create(&incoming.user).await;
        let mut session = handle.lock().await;
        session.touch();

        let pending = session.current_step;
        let replies = match Command::parse(&incoming.text) {
            Some(command) => self.on_command(&mut session, command, incoming.first_name.as_deref()),
            None => match pending {
                Some(step) => self.on_answer(&mut session, step, incoming.text.trim()).await,
                None => {
                    debug!(user = %session.user, "unrecognized input while idle");
                    vec![Reply::with_keyboard(
                        messages::UNRECOGNIZED_INPUT,
                        session.last_menu.keyboard(),
                    )]
                }
            },
        };

        debug_assert!(session.is_consistent(), "scratch left behind without a step");
        replies
    }

    fn on_command(
        &self,
        session: &mut Session,
        command: Command,
        first_name: Option<&str>,
    ) -> Vec<Reply> {
        if let Some(step) = session.current_step {
            debug!(user = %session.user, %step, ?command, "flow abandoned by menu command");
        }
        session.abandon_flow();

        match command {
            Command::Start => {
                session.last_menu = MenuId::Main;
                vec![Reply::with_keyboard(
                    messages::welcome(first_name),
                    MenuId::Main.keyboard(),
                )]
            }
            Command::MainMenu => show_menu(session, MenuId::Main),
            Command::Back => {
                let target = session.last_menu.parent();
                show_menu(session, target)
            }
            Command::Open(menu) => show_menu(session, menu),
            Command::AlphaVybe => vec![Reply::with_link(messages::ALPHA, menu::alpha_link())],
            Command::Help => vec![Reply::text(messages::HELP)],
            Command::Begin(flow) => {
                let entry = flow.entry();
                session.begin(entry);
                info!(user = %session.user, %flow, "flow started");
                vec![prompt(&entry.definition())]
            }
        }
    }

    async fn on_answer(&self, session: &mut Session, step: StepId, input: &str) -> Vec<Reply> {
        let definition = step.definition();
        let value = match definition.accept(&session.scratch, input) {
            Ok(value) => value,
            Err(kind) => {
                debug!(user = %session.user, %step, %kind, "answer rejected");
                return vec![Reply::text(definition.error)];
            }
        };
        session.scratch.insert(definition.key, value);

        match definition.on_success {
            Transition::Advance(next) => {
                session.current_step = Some(next);
                vec![prompt(&next.definition())]
            }
            Transition::Terminate(flow) => self.finish(session, flow).await,
        }
    }

    /// Run the terminal action. The scratch is moved out before the gateway
    /// call, so the session stays consistent even if this future is dropped.
    async fn finish(&self, session: &mut Session, flow: Flow) -> Vec<Reply> {
        session.current_step = None;
        let scratch = std::mem::take(&mut session.scratch);

        info!(user = %session.user, %flow, gateway = self.gateway.name(), "running terminal action");
        let result = action::run(flow, &scratch, self.gateway.as_ref()).await;
        drop(scratch);

        let mut replies = self.render(&session.user, flow, result);
        if let Some(menu) = flow.return_menu() {
            replies.extend(show_menu(session, menu));
        }
        replies
    }

    fn render(&self, user: &UserId, flow: Flow, result: FlowResult) -> Vec<Reply> {
        match result {
            FlowResult::TextOnly(body) => self.text(&body),
            FlowResult::TextWithLink(body, link) => {
                let mut replies = self.text(&body);
                if let Some(Reply::Text(last)) = replies.last_mut() {
                    last.link = Some(link);
                }
                replies
            }
            FlowResult::TextAndImage(body, image) => {
                let mut replies = self.text(&body);
                replies.push(self.photo(user, image));
                replies
            }
            FlowResult::Failure(kind, message) => {
                if kind.is_informational() {
                    info!(user = %user, %flow, %kind, "flow finished without data");
                } else {
                    warn!(user = %user, %flow, %kind, "flow failed");
                }
                let message = if message.is_empty() {
                    messages::failure(kind).to_string()
                } else {
                    message
                };
                vec![Reply::text(message)]
            }
        }
    }

    fn text(&self, body: &str) -> Vec<Reply> {
        chunk::split(body, self.config.message_limit)
            .into_iter()
            .map(Reply::text)
            .collect()
    }

    fn photo(&self, user: &UserId, image: ChartImage) -> Reply {
        match ChartArtifact::create(&self.config.chart_dir, user.as_str(), &image.bytes) {
            Ok(artifact) => Reply::Photo {
                artifact,
                caption: image.caption,
            },
            Err(e) => {
                warn!(user = %user, error = %e, "could not write chart artifact");
                Reply::text(e.user_message())
            }
        }
    }
}

fn show_menu(session: &mut Session, menu: MenuId) -> Vec<Reply> {
    session.last_menu = menu;
    vec![Reply::with_keyboard(menu.title(), menu.keyboard())]
}

fn prompt(definition: &StepDefinition) -> Reply {
    match definition.keyboard {
        Some(keyboard) => Reply::with_keyboard(definition.prompt, keyboard()),
        None => Reply::text(definition.prompt),
    }
}

/// Builder for [`Dialog`]
pub struct DialogBuilder {
    gateway: Option<Arc<dyn AnalyticsGateway>>,
    config: DialogConfig,
}

impl Default for DialogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogBuilder {
    pub fn new() -> Self {
        Self {
            gateway: None,
            config: DialogConfig::default(),
        }
    }

    pub fn gateway(mut self, gateway: Arc<dyn AnalyticsGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn config(mut self, config: DialogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn message_limit(mut self, limit: usize) -> Self {
        self.config.message_limit = limit.max(1);
        self
    }

    pub fn chart_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.chart_dir = dir.into();
        self
    }

    pub fn build(self) -> Result<Dialog> {
        let gateway = self
            .gateway
            .ok_or_else(|| BotError::Config("Analytics gateway is required".into()))?;

        Ok(Dialog::new(gateway, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gateway::MockGateway;
    use crate::reply::LinkButton;

    const ADDR: &str = "So11111111111111111111111111111111111111112a";

    fn dialog() -> (Arc<MockGateway>, Dialog) {
        let gateway = Arc::new(MockGateway::new());
        let dialog = Dialog::builder().gateway(gateway.clone()).build().unwrap();
        (gateway, dialog)
    }

    async fn send(dialog: &Dialog, text: &str) -> Vec<Reply> {
        let replies = dialog.handle(&Incoming::new("u1", text)).await;
        let session = dialog.sessions().snapshot(&UserId::from_string("u1")).await.unwrap();
        assert!(session.is_consistent(), "inconsistent after {text:?}");
        replies
    }

    async fn state(dialog: &Dialog) -> Session {
        dialog.sessions().snapshot(&UserId::from_string("u1")).await.unwrap()
    }

    fn bodies(replies: &[Reply]) -> Vec<&str> {
        replies.iter().filter_map(Reply::body).collect()
    }

    #[tokio::test]
    async fn test_nft_collection_owners_scenario() {
        let (gateway, dialog) = dialog();

        let replies = send(&dialog, "🎨 NFT").await;
        assert_eq!(bodies(&replies), vec![MenuId::Nft.title()]);
        let keyboard = replies[0].keyboard().unwrap();
        assert!(keyboard.labels().any(|l| l == "👑 NFT Collection Owners"));

        let replies = send(&dialog, "👑 NFT Collection Owners").await;
        assert_eq!(bodies(&replies), vec![messages::ENTER_COLLECTION_ADDRESS]);
        assert_eq!(
            state(&dialog).await.current_step.map(|s| s.to_string()).as_deref(),
            Some("awaiting_collection_address")
        );

        let replies = send(&dialog, ADDR).await;
        assert_eq!(gateway.calls(), vec![format!("collection_owners({ADDR})")]);
        assert_eq!(bodies(&replies), vec![format!("collection_owners: {ADDR}").as_str()]);

        let session = state(&dialog).await;
        assert!(session.is_idle());
        assert!(session.scratch.is_empty());
    }

    #[tokio::test]
    async fn test_main_menu_abandons_flow() {
        let (gateway, dialog) = dialog();

        send(&dialog, "📊 Token Analysis").await;
        send(&dialog, "📋 Info").await;
        assert_eq!(state(&dialog).await.current_step, Some(StepId::AwaitingTokenInfoMint));

        let replies = send(&dialog, "🏠 Main Menu").await;
        assert_eq!(bodies(&replies), vec![MenuId::Main.title()]);
        assert!(state(&dialog).await.is_idle());

        let replies = send(&dialog, ADDR).await;
        assert_eq!(bodies(&replies), vec![messages::UNRECOGNIZED_INPUT]);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_menu_label_mid_flow_is_a_command_not_an_answer() {
        let (gateway, dialog) = dialog();

        send(&dialog, "🏆 Top Token Holders").await;
        send(&dialog, ADDR).await;
        assert_eq!(state(&dialog).await.scratch.len(), 1);

        send(&dialog, "📦 Programs").await;
        let session = state(&dialog).await;
        assert!(session.is_idle());
        assert!(session.scratch.is_empty());
        assert_eq!(session.last_menu, MenuId::Programs);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_answer_reprompts_and_keeps_state() {
        let (gateway, dialog) = dialog();

        send(&dialog, "📈 PnL").await;
        for attempt in ["short", "", "🚀", &"a".repeat(47)] {
            let replies = send(&dialog, attempt).await;
            assert_eq!(bodies(&replies), vec![messages::INVALID_WALLET_ADDRESS]);
            assert_eq!(state(&dialog).await.current_step, Some(StepId::AwaitingPnlWallet));
        }

        send(&dialog, &format!("  {ADDR}\n")).await;
        assert_eq!(state(&dialog).await.current_step, Some(StepId::AwaitingPnlDays));

        let replies = send(&dialog, "14").await;
        assert_eq!(bodies(&replies), vec![messages::INVALID_TIMESPAN_1D_7D_30D]);
        assert_eq!(state(&dialog).await.scratch.len(), 1);

        send(&dialog, "7").await;
        assert_eq!(gateway.calls(), vec![format!("wallet_pnl({ADDR}, 7)")]);
    }

    #[tokio::test]
    async fn test_end_date_equal_to_start_is_rejected() {
        let (gateway, dialog) = dialog();

        send(&dialog, "📅 Daily Top Holders").await;
        send(&dialog, ADDR).await;
        send(&dialog, "2025-01-01").await;

        let replies = send(&dialog, "2025-01-01").await;
        assert_eq!(bodies(&replies), vec![messages::INVALID_END_DATE]);
        assert_eq!(state(&dialog).await.current_step, Some(StepId::AwaitingHoldersEnd));

        send(&dialog, "2025-01-09").await;
        assert_eq!(
            gateway.calls(),
            vec![format!("daily_holders({ADDR}, 2025-01-01, 2025-01-09)")]
        );
    }

    #[tokio::test]
    async fn test_top_holders_two_layer_validation() {
        let (gateway, dialog) = dialog();

        send(&dialog, "📊 Token Analysis").await;
        send(&dialog, "👤 Holders").await;
        send(&dialog, "🏆 Top Token Holders").await;
        send(&dialog, ADDR).await;

        let replies = send(&dialog, "valueUsd").await;
        assert_eq!(bodies(&replies), vec![messages::SORT_ORDER]);
        assert!(replies[0].keyboard().unwrap().labels().any(|l| l == "asc"));

        send(&dialog, "DESC").await;
        let replies = send(&dialog, "0").await;
        assert_eq!(bodies(&replies), vec![messages::INVALID_HOLDERS_COUNT]);
        assert!(gateway.calls().is_empty());

        let replies = send(&dialog, "5").await;
        assert_eq!(
            gateway.calls(),
            vec![format!("top_holders({ADDR}, valueUsd, desc, 5)")]
        );
        assert_eq!(bodies(&replies).last().copied(), Some(MenuId::Token.title()));
        assert_eq!(state(&dialog).await.last_menu, MenuId::Token);
    }

    #[tokio::test]
    async fn test_failure_is_one_message_and_resets() {
        let (gateway, dialog) = dialog();
        gateway.respond(
            "token_info",
            FlowResult::Failure(ErrorKind::NotFound, "❌ Token not found!".into()),
        );

        send(&dialog, "📋 Info").await;
        let replies = send(&dialog, ADDR).await;
        assert_eq!(bodies(&replies), vec!["❌ Token not found!"]);
        assert!(state(&dialog).await.is_idle());

        let replies = send(&dialog, ADDR).await;
        assert_eq!(bodies(&replies), vec![messages::UNRECOGNIZED_INPUT]);
    }

    #[tokio::test]
    async fn test_chart_becomes_scoped_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockGateway::new());
        gateway.respond(
            "tvl",
            FlowResult::TextAndImage(
                "📈 TVL".into(),
                ChartImage {
                    bytes: b"\x89PNG".to_vec(),
                    caption: Some("TVL".into()),
                },
            ),
        );
        let dialog = Dialog::builder()
            .gateway(gateway)
            .chart_dir(dir.path())
            .build()
            .unwrap();

        dialog.handle(&Incoming::new("u1", "📈 TVL")).await;
        dialog.handle(&Incoming::new("u1", ADDR)).await;
        let mut replies = dialog.handle(&Incoming::new("u1", "1d")).await;

        assert_eq!(replies.len(), 2);
        let Some(Reply::Photo { artifact, caption }) = replies.pop() else {
            panic!("expected a photo reply");
        };
        assert_eq!(caption.as_deref(), Some("TVL"));
        let path = artifact.path().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_link_rides_on_last_chunk() {
        let gateway = Arc::new(MockGateway::new());
        let body = format!("{}\n{}", "a".repeat(30), "b".repeat(30));
        gateway.respond(
            "program_details",
            FlowResult::TextWithLink(body.clone(), LinkButton::new("🖼 Logo", "https://x.y/logo.png")),
        );
        let dialog = Dialog::builder()
            .gateway(gateway)
            .message_limit(40)
            .build()
            .unwrap();

        dialog.handle(&Incoming::new("u1", "📄 Details")).await;
        let replies = dialog.handle(&Incoming::new("u1", ADDR)).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(bodies(&replies).concat(), body);
        match (&replies[0], &replies[1]) {
            (Reply::Text(first), Reply::Text(last)) => {
                assert!(first.link.is_none());
                assert_eq!(last.link.as_ref().map(|l| l.url.as_str()), Some("https://x.y/logo.png"));
            }
            _ => panic!("expected two text replies"),
        }
    }

    #[tokio::test]
    async fn test_back_is_a_two_level_stack() {
        let (_, dialog) = dialog();

        send(&dialog, "📊 Token Analysis").await;
        send(&dialog, "👤 Holders").await;
        send(&dialog, "📅 Daily Top Holders").await;

        let replies = send(&dialog, "🔙 Back").await;
        assert_eq!(bodies(&replies), vec![MenuId::Token.title()]);
        assert!(state(&dialog).await.is_idle());

        let replies = send(&dialog, "🔙 Back").await;
        assert_eq!(bodies(&replies), vec![MenuId::Main.title()]);

        let replies = send(&dialog, "🔙 Back").await;
        assert_eq!(bodies(&replies), vec![MenuId::Main.title()]);
    }

    #[tokio::test]
    async fn test_start_help_and_alpha() {
        let (_, dialog) = dialog();

        let replies = dialog
            .handle(&Incoming::new("u1", "/start").with_first_name("Ada"))
            .await;
        assert!(bodies(&replies)[0].starts_with("👋 Hello Ada"));
        assert_eq!(replies[0].keyboard(), Some(&MenuId::Main.keyboard()));

        let replies = send(&dialog, "❓ Help").await;
        assert_eq!(bodies(&replies), vec![messages::HELP]);

        let replies = send(&dialog, "🅰️ Alpha Vybe").await;
        match &replies[0] {
            Reply::Text(text) => assert_eq!(text.link.as_ref().map(|l| l.url.as_str()), Some(messages::ALPHA_URL)),
            Reply::Photo { .. } => panic!("expected text"),
        }
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let (gateway, dialog) = dialog();
        let dialog = Arc::new(dialog);

        let alice = {
            let dialog = Arc::clone(&dialog);
            tokio::spawn(async move {
                dialog.handle(&Incoming::new("alice", "🪙 SPL")).await;
                dialog.handle(&Incoming::new("alice", ADDR)).await
            })
        };
        let bob = {
            let dialog = Arc::clone(&dialog);
            tokio::spawn(async move {
                dialog.handle(&Incoming::new("bob", "💼 Balances")).await;
                dialog.handle(&Incoming::new("bob", ADDR)).await
            })
        };
        alice.await.unwrap();
        bob.await.unwrap();

        let bob_state = dialog
            .sessions()
            .snapshot(&UserId::from_string("bob"))
            .await
            .unwrap();
        assert_eq!(bob_state.current_step, Some(StepId::AwaitingBalancesDays));
        assert_eq!(bob_state.scratch.address(), Some(ADDR));

        let alice_state = dialog
            .sessions()
            .snapshot(&UserId::from_string("alice"))
            .await
            .unwrap();
        assert!(alice_state.is_idle());
        assert_eq!(gateway.calls(), vec![format!("wallet_tokens({ADDR})")]);
    }

    #[tokio::test]
    async fn test_invariant_holds_over_generated_sessions() {
        let (_, dialog) = dialog();
        let mut inputs: Vec<String> = Flow::ALL.iter().map(|f| f.label().to_string()).collect();
        inputs.extend(
            [
                ADDR, "7", "30", "0", "1d", "3h", "1mo", "2025-01-01", "2025-02-01", "valueUsd",
                "asc", "10", "hour", "🔙 Back", "🏠 Main Menu", "👤 Holders", "garbage", "",
            ]
            .map(String::from),
        );

        let mut seed: u64 = 42;
        for _ in 0..600 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let input = &inputs[(seed >> 33) as usize % inputs.len()];
            send(&dialog, input).await;
        }
    }
}
