//! End-to-end playthroughs of the bundled Ravenswood case.

use rw_engine::{
    Category, ErrorKind, Game, GameConfig, GameError, Readiness, Resolution, Reveal, Screen,
};

const ALL_EVIDENCE: &[(&str, usize)] = &[
    ("library", 0),
    ("library", 1),
    ("library", 2),
    ("library", 3),
    ("kitchen", 0),
    ("kitchen", 1),
    ("garden", 0),
    ("garden", 1),
    ("smoking_room", 0),
    ("smoking_room", 1),
];

fn game() -> Game {
    Game::ravenswood(GameConfig::default()).unwrap()
}

fn search_everywhere(game: &mut Game) {
    for (location, index) in ALL_EVIDENCE {
        game.find_evidence(location, *index).unwrap();
    }
}

#[test]
fn library_find_is_idempotent() {
    let mut game = game();
    let first = game.find_evidence("library", 0).unwrap();
    assert_eq!(game.clues().len(), 1);
    assert_eq!(game.clues()[0].title, "凶器上的指纹");

    let second = game.find_evidence("library", 0).unwrap();
    assert_eq!(first, second);
    assert_eq!(game.clues().len(), 1);
    assert_eq!(game.searches().len(), 1);
    assert_eq!(game.session().found_at("library"), vec![0]);
}

#[test]
fn bates_terminal_follow_up_marks_explored() {
    let mut game = game();
    let step = game.start_conversation("bates", "bates_q1").unwrap();
    assert_eq!(step.step_index, 0);
    assert_eq!(step.clue.as_ref().unwrap().title, "钥匙线索");
    assert_eq!(step.follow_ups.len(), 2);
    assert_eq!(game.screen(), Screen::Dialog);

    let end = game.choose_follow_up("bates", "bates_q1", 0, 1).unwrap();
    match &end {
        Resolution::Terminal(view) => {
            assert_eq!(view.choice, "谢谢你，贝茨。");
            assert!(view.clue.is_none());
        }
        other => panic!("expected terminal, got {other:?}"),
    }

    let options = game.conversations("bates").unwrap();
    assert!(options[0].explored);
    assert!(options[1..].iter().all(|o| !o.explored));
    assert_eq!(game.questions_asked(), 1);
    assert!(game.current_step().is_none());
}

#[test]
fn bates_deep_branch_reveals_timeline_clue() {
    let mut game = game();
    game.start_conversation("bates", "bates_q1").unwrap();
    game.choose_follow_up("bates", "bates_q1", 0, 0).unwrap();
    // back to the start, then all the way down
    game.choose_follow_up("bates", "bates_q1", 1, 1).unwrap();
    game.choose_follow_up("bates", "bates_q1", 0, 0).unwrap();
    let deepest = game.choose_follow_up("bates", "bates_q1", 1, 0).unwrap();
    assert!(matches!(&deepest, Resolution::Step(v) if v.step_index == 2));

    let end = game.choose_follow_up("bates", "bates_q1", 2, 0).unwrap();
    assert!(end.is_terminal());

    let titles: Vec<_> = game.clues().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["钥匙线索", "送酒时间的出入"]);
    assert_eq!(
        game.categorized_clues()[&Category::Timeline][0].title,
        "送酒时间的出入"
    );

    let transcript = game.transcript();
    assert!(matches!(transcript.first(), Some(Reveal::Entry(_))));
    assert!(matches!(transcript.last(), Some(Reveal::Clue(c)) if c.title == "送酒时间的出入"));
}

#[test]
fn follow_ups_require_the_step_on_screen() {
    let mut game = game();
    let err = game.choose_follow_up("bates", "bates_q1", 0, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(game.conversations("bates").unwrap().iter().all(|o| !o.explored));
    assert_eq!(game.questions_asked(), 0);
    assert_eq!(game.screen(), Screen::Title);

    game.start_conversation("bates", "bates_q1").unwrap();
    let err = game.choose_follow_up("bates", "bates_q1", 2, 0).unwrap_err();
    assert!(matches!(err, GameError::ConversationNotActive { step: 2, .. }));
    let titles: Vec<_> = game.clues().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["钥匙线索"]);
    assert_eq!(game.current_step().unwrap().step_index, 0);
}

#[test]
fn flat_questions_keep_appending_to_the_transcript() {
    let mut game = game();
    game.start_conversation("emily", "emily_q1").unwrap();
    let after_first = game.transcript().len();
    let second = game.start_conversation("emily", "emily_q2").unwrap();

    assert_eq!(game.transcript().len(), after_first + second.reveals().len());
    assert!(matches!(
        &game.transcript()[1],
        Reveal::Answer { speaker, .. } if speaker == &game.case().character("emily").unwrap().name
    ));
}

#[test]
fn replaying_a_conversation_counts_once() {
    let mut game = game();
    for _ in 0..3 {
        game.start_conversation("emily", "emily_q1").unwrap();
    }
    assert_eq!(game.questions_asked(), 1);
    let card = &game.character_cards()[0];
    assert_eq!(card.questions_asked, 1);
}

#[test]
fn full_search_detection() {
    let mut game = game();
    assert!(!game.is_location_fully_searched("smoking_room").unwrap());
    game.find_evidence("smoking_room", 1).unwrap();
    assert!(!game.is_location_fully_searched("smoking_room").unwrap());
    game.find_evidence("smoking_room", 0).unwrap();
    assert!(game.is_location_fully_searched("smoking_room").unwrap());
    assert!(!game.is_location_fully_searched("library").unwrap());
}

#[test]
fn evidence_clues_unlock_deduction_but_misleading_ones_are_flagged() {
    let mut game = game();
    search_everywhere(&mut game);

    assert_eq!(game.clues().len(), 8);
    assert!(game.deduction_unlocked());
    assert!(!game.deduction_ready());
    assert_eq!(game.deduction_hint(), "你已经收集了足够的线索，可以开始推理了！");

    let stats = game.clue_statistics();
    assert_eq!(stats.total, 8);
    assert_eq!(stats.misleading, 2);
    assert_eq!(stats.valid, 6);
    assert_eq!(stats.readiness, Readiness::KeepSearching { have: 6, need: 8 });
    assert!(stats.by_character.is_empty());

    let groups = game.categorized_clues();
    assert_eq!(groups[&Category::Evidence].len(), 2);
    assert_eq!(groups[&Category::Timeline].len(), 1);
    assert_eq!(groups[&Category::Behavior].len(), 1);
    assert!(groups[&Category::Testimony].is_empty());

    game.select_suspect("bates").unwrap();
    assert!(game.deduction_ready());
}

#[test]
fn deduction_locked_below_threshold() {
    let mut game = game();
    for (location, index) in &ALL_EVIDENCE[..5] {
        game.find_evidence(location, *index).unwrap();
    }
    game.select_suspect("bates").unwrap();
    assert_eq!(game.clues().len(), 4);
    assert!(!game.deduction_unlocked());
    assert!(!game.deduction_ready());
    assert_eq!(game.deduction_hint(), "还需要收集更多线索 (4/8)");
}

#[test]
fn required_reasoning_gates_readiness_and_submission() {
    let mut game = Game::ravenswood(GameConfig::default().with_reasoning_required(10)).unwrap();
    search_everywhere(&mut game);
    game.select_suspect("bates").unwrap();
    assert!(!game.deduction_ready());

    let err = game.submit_deduction(Some("他是管家")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(!game.is_completed());

    game.set_reasoning("贝茨有备用钥匙，而且送酒的时间说不通。").unwrap();
    assert!(game.deduction_ready());
    let verdict = game.submit_deduction(None).unwrap();
    assert!(verdict.is_correct);
}

#[test]
fn verdict_correct_and_incorrect() {
    let mut right = game();
    right.select_suspect("bates").unwrap();
    let verdict = right.submit_deduction(None).unwrap();
    assert!(verdict.is_correct);
    assert_eq!(verdict.suspect_name, right.case().character("bates").unwrap().name);
    assert!(verdict.narrative.contains(&right.case().solution().truth));
    assert_eq!(right.screen(), Screen::Result);

    for suspect in ["emily", "morrison", "harris", "sanders", "victoria"] {
        let mut wrong = game();
        wrong.select_suspect(suspect).unwrap();
        let verdict = wrong.submit_deduction(None).unwrap();
        assert!(!verdict.is_correct, "{suspect} should not be the culprit");
        assert_eq!(verdict.culprit, "bates");
    }
}

#[test]
fn accusation_without_suspect_is_invalid_state() {
    let mut game = game();
    let err = game.submit_deduction(None).unwrap_err();
    assert!(matches!(err, GameError::NoSuspectSelected));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn closed_case_refuses_commands() {
    let mut game = game();
    game.select_suspect("bates").unwrap();
    game.submit_deduction(None).unwrap();

    for err in [
        game.find_evidence("library", 0).unwrap_err(),
        game.start_conversation("bates", "bates_q1").unwrap_err(),
        game.select_suspect("emily").unwrap_err(),
        game.submit_deduction(None).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
    assert!(game.clues().is_empty());
}

#[test]
fn unknown_ids_are_not_found() {
    let mut game = game();
    for err in [
        game.start_conversation("nobody", "bates_q1").unwrap_err(),
        game.start_conversation("bates", "emily_q1").unwrap_err(),
        game.choose_follow_up("bates", "bates_q1", 9, 0).unwrap_err(),
        game.find_evidence("attic", 0).unwrap_err(),
        game.find_evidence("library", 4).unwrap_err(),
        game.select_suspect("butler").unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn restart_resets_every_query() {
    let mut game = game();
    search_everywhere(&mut game);
    game.start_conversation("bates", "bates_q1").unwrap();
    game.choose_follow_up("bates", "bates_q1", 0, 1).unwrap();
    game.select_suspect("harris").unwrap();
    game.submit_deduction(Some("女仆最可疑")).unwrap();

    game.restart();

    assert_eq!(game.screen(), Screen::Title);
    assert!(game.clues().is_empty());
    assert!(game.ledger().is_empty());
    assert!(game.searches().is_empty());
    assert!(game.transcript().is_empty());
    assert!(game.current_step().is_none());
    assert!(game.selected_suspect().is_none());
    assert!(game.reasoning().is_empty());
    assert!(!game.is_completed());
    assert!(!game.deduction_unlocked());
    assert_eq!(game.questions_asked(), 0);
    assert_eq!(game.questions_remaining(), 30);
    assert!(game.journal().is_empty());
    assert!(game.conversations("bates").unwrap().iter().all(|o| !o.explored));
    assert!(game.evidence("library").unwrap().iter().all(|e| !e.found));
    assert!(game.character_cards().iter().all(|c| c.questions_asked == 0));

    game.find_evidence("library", 0).unwrap();
    assert_eq!(game.clues().len(), 1);
}

#[test]
fn journal_records_the_playthrough() {
    let mut game = game();
    game.find_evidence("library", 0).unwrap();
    game.start_conversation("harris", "harris_q1").unwrap();
    game.select_suspect("bates").unwrap();
    game.submit_deduction(None).unwrap();

    let md = game.journal().export_markdown();
    assert!(md.contains("**Found** 青铜雕像 in "));
    assert!(md.contains("**Clue** 凶器上的指纹"));
    assert!(md.contains("**Questioned** "));
    assert!(md.contains("(correct)"));
}
