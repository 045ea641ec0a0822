use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use line_term::{Program, ProgramIo, Session, SessionConfig, Transcript};
use std::io::Write;

/// Adds its numeric arguments, asking for operands when given none. Output is written a few
/// bytes at a time so lines arrive split across chunks.
struct Calc;

impl Program for Calc {
    fn run(&mut self, argv: &[String], io: &mut ProgramIo<'_>) -> Result<()> {
        let operands: Vec<&str> = argv[1..]
            .iter()
            .map(String::as_str)
            .filter(|arg| *arg != "calc")
            .collect();
        if operands.is_empty() {
            write!(io, "operands: ")?;
            io.read_line();
            return Ok(());
        }
        let mut sum = 0i64;
        for operand in operands {
            sum += operand
                .parse::<i64>()
                .with_context(|| format!("not a number: {operand}"))?;
        }
        for piece in format!("= {sum} ≈ done\n").as_bytes().chunks(3) {
            io.write_all(piece)?;
        }
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_line(session: &mut Session<Transcript>, line: &str) {
    for c in line.chars() {
        assert_eq!(session.handle_key(&key(KeyCode::Char(c))), None);
    }
}

fn enter(session: &mut Session<Transcript>, line: &str) {
    type_line(session, line);
    if let Some(argv) = session.handle_key(&key(KeyCode::Enter)) {
        session.run_program(&mut Calc, &argv);
    }
}

#[test]
fn calc_session() {
    let mut session = Session::new(SessionConfig::new("calc"), Transcript::new());
    enter(&mut session, "calc 2 3");
    enter(&mut session, "");
    enter(&mut session, "4 x");
    enter(&mut session, "calc");
    enter(&mut session, "1 1");

    insta::assert_snapshot!(session.display().text().replace('\n', "|"), @"$ calc calc 2 3|= 5 ≈ done|$ calc |$ calc 4 x|error: not a number: x: invalid digit found in string|$ calc calc|reading from stdin...|$ calc 1 1|operands: = 2 ≈ done|");
    assert_eq!(
        session.editor().history().entries(),
        ["calc 2 3", "4 x", "calc"]
    );
}

#[test]
fn history_recall_and_edit() {
    let mut session = Session::new(SessionConfig::new("calc"), Transcript::new());
    enter(&mut session, "1 2");
    enter(&mut session, "3 4");

    session.handle_key(&key(KeyCode::Up));
    session.handle_key(&key(KeyCode::Up));
    session.handle_key(&key(KeyCode::Up));
    assert_eq!(session.editor().buffer().as_str(), "1 2");

    session.handle_key(&key(KeyCode::Backspace));
    type_line(&mut session, "5");
    let argv = session.handle_key(&key(KeyCode::Enter));
    assert_eq!(
        argv,
        Some(vec!["calc".to_string(), "1".to_string(), "5".to_string()])
    );

    session.handle_key(&key(KeyCode::Up));
    assert_eq!(session.editor().buffer().as_str(), "1 5");
    session.handle_key(&key(KeyCode::Down));
    assert_eq!(session.editor().buffer().as_str(), "");
}

#[test]
fn clear_screen_empties_display_only() {
    let mut session = Session::new(SessionConfig::new("calc"), Transcript::new());
    enter(&mut session, "2 2");
    type_line(&mut session, "9");
    session.handle_key(&KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));

    assert_eq!(session.display().text(), "");
    assert_eq!(session.editor().buffer().as_str(), "9");
    assert_eq!(session.editor().history().len(), 1);
}
