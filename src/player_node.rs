//! Protocol engine driving one [`Player`] through a match.

#[cfg(unix)]
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::player::{MatchContext, Player};
use crate::protocol::{
    ClientMessage, JsonCodec, PlayerNum, PlayerReport, ProtocolVersion, ServerMessage, Ship, Shot,
};
use crate::stats::MatchStats;
use crate::transport::Transport;

/// Where the engine is in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Connecting,
    AwaitingSetup,
    AwaitingStart,
    Playing,
    MatchOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Outcome of handling one server message: at most one reply, and whether
/// the match goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub reply: Option<ClientMessage>,
    pub flow: Flow,
}

impl Step {
    pub fn none() -> Self {
        Self {
            reply: None,
            flow: Flow::Continue,
        }
    }

    pub fn send(reply: ClientMessage) -> Self {
        Self {
            reply: Some(reply),
            flow: Flow::Continue,
        }
    }

    pub fn stop() -> Self {
        Self {
            reply: None,
            flow: Flow::Stop,
        }
    }
}

pub struct PlayerNode<P: Player, T: Transport> {
    player: P,
    transport: T,
    codec: JsonCodec,
    phase: Phase,
    context: Option<MatchContext>,
    stats: MatchStats,
}

impl<P: Player, T: Transport> PlayerNode<P, T> {
    pub fn new(player: P, transport: T, version: ProtocolVersion) -> Self {
        Self {
            player,
            transport,
            codec: JsonCodec::new(version),
            phase: Phase::Connecting,
            context: None,
            stats: MatchStats::new(),
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn match_stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Boards and seat of the running match, `None` outside of one.
    pub fn context(&self) -> Option<&MatchContext> {
        self.context.as_ref()
    }

    pub fn version(&self) -> ProtocolVersion {
        self.codec.version()
    }

    /// Play one match to completion.
    ///
    /// Sends `hello`, requires `setup_match` as the first reply, then answers
    /// server messages until `match_over`. The transport is closed whatever the
    /// outcome.
    pub async fn run(&mut self, ai_name: &str, author_names: &str) -> Result<MatchStats> {
        self.phase = Phase::Connecting;
        self.context = None;
        self.stats = MatchStats::new();

        let outcome = self.drive(ai_name, author_names).await;

        self.context = None;
        if let Err(e) = self.transport.close().await {
            log::debug!("closing transport failed: {}", e);
        }
        outcome.map(|()| self.stats)
    }

    async fn drive(&mut self, ai_name: &str, author_names: &str) -> Result<()> {
        self.handshake(ai_name, author_names).await?;
        loop {
            let message = self.receive().await?;
            let step = self.step(message)?;
            if let Some(reply) = step.reply {
                self.send(&reply).await?;
            }
            if step.flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    async fn handshake(&mut self, ai_name: &str, author_names: &str) -> Result<()> {
        let hello = ClientMessage::Hello {
            ai_name: ai_name.to_owned(),
            author_names: author_names.to_owned(),
        };
        self.send(&hello).await?;
        self.phase = Phase::AwaitingSetup;

        let first = self.receive().await?;
        if !matches!(first, ServerMessage::SetupMatch { .. }) {
            log::error!(
                "{} Error: Incorrect setup_match message! (line: {})",
                ai_name,
                line!()
            );
            return Err(ClientError::Protocol {
                expected: "setup_match",
                found: describe(&first),
            });
        }
        self.step(first)?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<ServerMessage> {
        let frame = self.transport.recv().await?;
        let message = self.codec.decode_server(&frame)?;
        log::debug!("<- {:?}", message);
        Ok(message)
    }

    async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let payload = self.codec.encode_client(message)?;
        log::debug!("-> {}", String::from_utf8_lossy(&payload));
        self.transport.send(&payload).await
    }

    /// Apply one server message to the match state and invoke the matching
    /// player callbacks.
    pub fn step(&mut self, message: ServerMessage) -> Result<Step> {
        self.check_phase(&message);

        let step = match message {
            ServerMessage::SetupMatch {
                board_size,
                player_num,
            } => {
                log::info!(
                    "match set up: {0}x{0} board, playing as player {1}",
                    board_size,
                    player_num
                );
                let ctx = self
                    .context
                    .insert(MatchContext::new(board_size, player_num));
                self.player.handle_setup_match(ctx);
                self.phase = Phase::AwaitingStart;
                Step::none()
            }
            ServerMessage::StartGame => {
                let ctx = require(&mut self.context, "start_game")?;
                ctx.reset();
                log::info!("game {} started", self.stats.games + 1);
                self.player.handle_start_game(ctx);
                self.phase = Phase::Playing;
                Step::none()
            }
            ServerMessage::PlaceShip { length } => {
                let ctx = require(&mut self.context, "place_ship")?;
                let ship = self.player.choose_ship_place(ctx, length);
                if ctx.record_placement(&ship) < length {
                    log::warn!("ship {:?} does not fit on the board", ship);
                }
                Step::send(ClientMessage::ShipPlaced(ship))
            }
            ServerMessage::TakeShot => {
                let ctx = require(&mut self.context, "take_shot")?;
                let shot = self.player.choose_shot(ctx);
                Step::send(ClientMessage::ShotTaken(shot))
            }
            ServerMessage::ShotReturn {
                player,
                shot,
                killed,
            } => {
                let ctx = require(&mut self.context, "shot_return")?;
                report_shot(&mut self.player, ctx, player, &shot);
                if let Some(ship) = killed {
                    report_kill(&mut self.player, ctx, player.other(), &ship);
                }
                Step::none()
            }
            ServerMessage::ShipDead { player, ship } => {
                let ctx = require(&mut self.context, "ship_dead")?;
                report_kill(&mut self.player, ctx, player, &ship);
                Step::none()
            }
            ServerMessage::ShotReport { p1, p2, next_shot } => {
                let ctx = require(&mut self.context, "shot_return")?;
                let me = ctx.player_num();
                let (mine, theirs) = match me {
                    PlayerNum::One => (p1, p2),
                    PlayerNum::Two => (p2, p1),
                };
                report_round(&mut self.player, ctx, me, &mine, &theirs);
                if next_shot {
                    let shot = self.player.choose_shot(ctx);
                    Step::send(ClientMessage::ShotTaken(shot))
                } else {
                    Step::none()
                }
            }
            ServerMessage::GameOver(game) => {
                let ctx = require(&mut self.context, "game_over")?;
                if let Some(game) = &game {
                    self.stats.record(game);
                    log::info!(
                        "game over: {:?} after {} shots ({} hits, {} misses)",
                        game.result,
                        game.num_board_shot,
                        game.hits,
                        game.misses
                    );
                } else {
                    log::info!("game over");
                }
                self.player.handle_game_over(ctx, game.as_ref());
                self.phase = Phase::AwaitingStart;
                Step::none()
            }
            ServerMessage::MatchOver => {
                log::info!(
                    "match over: {} won, {} lost, {} tied",
                    self.stats.wins,
                    self.stats.losses,
                    self.stats.ties
                );
                self.finish();
                Step::stop()
            }
            ServerMessage::Unknown(tag) => {
                log::warn!("unknown message type {}, ending match", tag);
                self.finish();
                Step::stop()
            }
        };
        Ok(step)
    }

    fn finish(&mut self) {
        self.player.handle_match_over(&self.stats);
        self.context = None;
        self.phase = Phase::MatchOver;
    }

    fn check_phase(&self, message: &ServerMessage) {
        let expected = match message {
            ServerMessage::SetupMatch { .. } => Phase::AwaitingSetup,
            ServerMessage::StartGame => Phase::AwaitingStart,
            ServerMessage::MatchOver | ServerMessage::Unknown(_) => return,
            _ => Phase::Playing,
        };
        if self.phase != expected {
            log::warn!(
                "{} received while {:?}, expected {:?}",
                message.name(),
                self.phase,
                expected
            );
        }
    }
}

fn require<'a>(
    context: &'a mut Option<MatchContext>,
    found: &'static str,
) -> Result<&'a mut MatchContext> {
    context.as_mut().ok_or_else(|| ClientError::Protocol {
        expected: "setup_match",
        found: found.to_owned(),
    })
}

fn describe(message: &ServerMessage) -> String {
    match message {
        ServerMessage::Unknown(tag) => format!("unknown message type {}", tag),
        other => other.name().to_owned(),
    }
}

fn report_shot<P: Player>(player: &mut P, ctx: &mut MatchContext, shooter: PlayerNum, shot: &Shot) {
    if let Err(e) = ctx.record_shot(shooter, shot) {
        log::warn!("ignoring shot of player {}: {}", shooter, e);
    }
    player.handle_shot_return(ctx, shooter, shot);
}

fn report_kill<P: Player>(player: &mut P, ctx: &mut MatchContext, owner: PlayerNum, ship: &Ship) {
    if ctx.record_kill(owner, ship) < ship.length {
        log::warn!("dead ship {:?} of player {} is off the board", ship, owner);
    }
    player.handle_ship_dead(ctx, owner, ship);
}

/// Own shot first, then the opponent's; kills in the same order.
fn report_round<P: Player>(
    player: &mut P,
    ctx: &mut MatchContext,
    me: PlayerNum,
    mine: &PlayerReport,
    theirs: &PlayerReport,
) {
    report_shot(player, ctx, me, &mine.shot);
    report_shot(player, ctx, me.other(), &theirs.shot);
    if let Some(ship) = &mine.ship {
        report_kill(player, ctx, me, ship);
    }
    if let Some(ship) = &theirs.ship {
        report_kill(player, ctx, me.other(), ship);
    }
}

/// Connect to the server socket in `config` and play one match with `player`.
#[cfg(unix)]
pub async fn play_match<P: Player>(config: &ClientConfig, player: P) -> Result<MatchStats> {
    use crate::transport::unix::UnixTransport;

    config.validate()?;
    let transport = UnixTransport::connect(&config.socket_path)
        .await?
        .with_read_timeout(config.read_timeout);
    let mut node = PlayerNode::new(player, transport, config.protocol);
    node.run(&config.ai_name, &config.author_names).await
}
