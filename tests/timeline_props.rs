use chess::{Color, MoveGen};
use proptest::prelude::*;
use proptest::sample::Index;

use chess_sync::authority::{ArbiterGame, RandomOpponent};
use chess_sync::game::{ChessRules, Move, Promotion, RulesEngine};
use chess_sync::models::{MoveRequest, NewGameRequest};
use chess_sync::session::{GameStateController, HistoryTimeline, Mode};
use chess_sync::sync::{interpret_move_response, NewGameStart};

/// Plays one legal move per choice, stopping early if the game ends.
fn played_timeline(choices: &[Index]) -> (HistoryTimeline, ChessRules) {
    let mut rules = ChessRules::new();
    let mut timeline = HistoryTimeline::new(rules.position());
    for choice in choices {
        let legal: Vec<_> = MoveGen::new_legal(rules.position().board()).collect();
        if legal.is_empty() {
            break;
        }
        let chosen = *choice.get(&legal);
        let mut mv = Move::new(chosen.get_source(), chosen.get_dest());
        if let Some(piece) = chosen.get_promotion() {
            mv = mv.with_promotion(piece);
        }
        let applied = rules.apply(&mv).unwrap();
        timeline.append(applied.position, Some(applied.san)).unwrap();
    }
    (timeline, rules)
}

fn snapshot(timeline: &HistoryTimeline) -> Vec<String> {
    (0..timeline.len())
        .map(|i| timeline.get(i).unwrap().fen())
        .collect()
}

proptest! {
    #[test]
    fn navigation_only_moves_the_cursor(
        choices in prop::collection::vec(any::<Index>(), 0..30),
        navs in prop::collection::vec((0u8..5, any::<Index>()), 0..40),
    ) {
        let (mut timeline, rules) = played_timeline(&choices);
        prop_assert_eq!(timeline.latest(), &rules.position());
        prop_assert!(timeline.is_live());

        let positions = snapshot(&timeline);
        let moves = timeline.moves();
        prop_assert_eq!(moves.len() + 1, timeline.len());

        for (kind, target) in navs {
            match kind {
                0 => { timeline.first(); }
                1 => { timeline.previous(); }
                2 => { timeline.next(); }
                3 => { timeline.last(); }
                _ => { timeline.navigate_to(target.index(timeline.len())).unwrap(); }
            }
            let cursor = timeline.cursor();
            prop_assert!(cursor < timeline.len());
            prop_assert_eq!(timeline.current(), timeline.get(cursor).unwrap());

            let nav = timeline.nav_state();
            prop_assert_eq!(nav.at_start, cursor == 0);
            prop_assert_eq!(nav.at_end, cursor + 1 == timeline.len());
        }

        prop_assert_eq!(snapshot(&timeline), positions);
        prop_assert_eq!(timeline.moves(), moves);
        prop_assert!(timeline.navigate_to(timeline.len()).is_err());
    }

    #[test]
    fn confirmed_plies_stay_in_step_with_the_server(
        choices in prop::collection::vec(any::<Index>(), 1..25),
    ) {
        let mut server = ArbiterGame::new(Box::new(RandomOpponent));
        let response = server.new_game(&NewGameRequest { color: "w".to_string() });
        prop_assert!(response.ok);

        let mut controller = GameStateController::new(Promotion::Queen);
        controller.start_game(Color::White);
        controller.confirm_new_game(NewGameStart {
            game_id: response.game_id,
            position: response.fen.unwrap().parse().unwrap(),
            opening: None,
            greeting: response.chat,
            opening_commentary: None,
        }).unwrap();

        for choice in choices {
            if controller.mode() != Mode::Live {
                break;
            }
            let live = controller.live_position();
            let legal: Vec<_> = MoveGen::new_legal(live.board()).collect();
            let chosen = *choice.get(&legal);
            let submitted = controller
                .attempt_user_move(Move::new(chosen.get_source(), chosen.get_dest()))
                .unwrap();
            prop_assert_eq!(controller.mode(), Mode::AwaitingRemote);

            let response = server.make_move(&MoveRequest { uci: submitted.mv.uci() });
            controller
                .apply_remote_result(submitted.pending_id, interpret_move_response(response))
                .unwrap();

            let timeline = controller.timeline();
            prop_assert_eq!(timeline.len(), server.moves().len() + 1);
            prop_assert!(timeline.latest().same_board(&server.rules().position()));
            prop_assert_eq!(controller.live_position(), server.rules().position());
            prop_assert!(timeline.is_live());
        }
    }
}
