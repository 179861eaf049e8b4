use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn xt(r: &Runtime, name: &str) -> Cell {
    r.lookup(name).unwrap().unwrap() as Cell
}

fn temp_source(tag: &str, text: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("mind-{}-{}.mind", tag, std::process::id()));
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_add() {
    let (mut r, _) = runtime();
    r.push(3).unwrap();
    r.push(4).unwrap();
    assert_eq!(eval(&mut r, "+"), Event::EndOfInput);
    assert_eq!(r.stack(), [7]);
}

#[test]
fn test_square() {
    let (mut r, _) = runtime();
    assert_eq!(eval(&mut r, ": square dup * ;"), Event::EndOfInput);
    assert!(!r.compiling().unwrap());
    r.push(5).unwrap();
    eval(&mut r, "square");
    assert_eq!(r.stack(), [25]);
}

#[test]
fn test_variable() {
    let (mut r, _) = runtime();
    r.push(42).unwrap();
    eval(&mut r, "create a 0 , a ! a @");
    assert_eq!(r.stack(), [42]);
    let a = r.lookup("a").unwrap().unwrap();
    assert_eq!(r.memory().fetch(a + 2 * CELL).unwrap(), 42);
}

#[test]
fn test_not_found() {
    let (mut r, out) = runtime();
    r.push(1).unwrap();
    assert_eq!(eval(&mut r, "zzz 2"), Event::Bye);
    assert_eq!(out.take(), "l0: not found: zzz\n");
    assert!(r.stack().is_empty());
}

#[test]
fn test_not_found_hook_is_rebindable() {
    let (mut r, out) = runtime();
    eval(&mut r, ": quiet -1 ; (') quiet (') word? >doer !");
    eval(&mut r, "zzz yyy");
    assert_eq!(out.take(), "");
    assert_eq!(r.stack(), [-1, -1]);
}

#[test]
fn test_abort_hook_quit() {
    let (mut r, out) = runtime();
    r.set_abort_hook("quit").unwrap();
    assert_eq!(eval(&mut r, "1 zzz 2"), Event::EndOfInput);
    assert_eq!(out.take(), "l0: not found: zzz\n");
    assert!(r.stack().is_empty());
    eval(&mut r, "2");
    assert_eq!(r.stack(), [2]);
}

#[test]
fn test_comment_compiles_nothing() {
    let (mut r, _) = runtime();
    eval(&mut r, ": f ( skip 1 me ) 1 \\ rest 2 of line\n 2 ;");
    assert_eq!(
        body(&r, "f"),
        [xt(&r, "1"), xt(&r, "2"), xt(&r, ";;")]
    );
    eval(&mut r, "f ( 1 ) \\ 2");
    assert_eq!(r.stack(), [1, 2]);
}

#[test]
fn test_shadowing() {
    let (mut r, _) = runtime();
    eval(&mut r, ": x 1 ; : y x ; : x 2 ;");
    let latest = r.dictionary().latest_xt(r.memory()).unwrap();
    assert_eq!(r.lookup("x").unwrap(), Some(latest));
    eval(&mut r, "x y");
    assert_eq!(r.stack(), [2, 1]);
}

#[test]
fn test_compile_execute_equivalence() {
    let text = "dup 1+ swap 2 * over v ! 1-";
    let (mut direct, _) = runtime();
    eval(&mut direct, "create v 0 ,");
    direct.push(5).unwrap();
    eval(&mut direct, text);

    let (mut compiled, _) = runtime();
    eval(&mut compiled, "create v 0 ,");
    eval(&mut compiled, &format!(": t {} ;", text));
    compiled.push(5).unwrap();
    eval(&mut compiled, "t");

    assert_eq!(direct.stack(), [6, 9]);
    assert_eq!(direct.stack(), compiled.stack());
    eval(&mut direct, "v @");
    eval(&mut compiled, "v @");
    assert_eq!(direct.stack(), compiled.stack());
}

#[test]
fn test_immediate_executes_while_compiling() {
    let (mut r, _) = runtime();
    eval(&mut r, ": mark 1 ; immediate");
    let mark = r.lookup("mark").unwrap().unwrap();
    assert_eq!(r.dictionary().flags(r.memory(), mark).unwrap(), IMMEDIATE);
    eval(&mut r, ": user mark ;");
    assert_eq!(r.stack(), [1]);
    assert_eq!(body(&r, "user"), [xt(&r, ";;")]);
    eval(&mut r, "mark user");
    assert_eq!(r.stack(), [1, 1]);
}

#[test]
fn test_brackets() {
    let (mut r, _) = runtime();
    eval(&mut r, "]");
    assert!(r.compiling().unwrap());
    eval(&mut r, "[");
    assert!(!r.compiling().unwrap());
    r.push(42).unwrap();
    eval(&mut r, ": t literal ; t");
    assert_eq!(r.stack(), [42]);
}

#[test]
fn test_does_shares_doer() {
    let (mut r, _) = runtime();
    eval(&mut r, ": const ^dodoes entry , does> @ ;");
    r.push(5).unwrap();
    eval(&mut r, "const five");
    r.push(9).unwrap();
    eval(&mut r, "const nine");
    eval(&mut r, "five nine five");
    assert_eq!(r.stack(), [5, 9, 5]);

    let five = r.lookup("five").unwrap().unwrap();
    let nine = r.lookup("nine").unwrap().unwrap();
    let dict = r.dictionary();
    assert_eq!(dict.doer(r.memory(), five).unwrap(), dict.doer(r.memory(), nine).unwrap());
    assert_eq!(r.memory().fetch(five).unwrap(), Opcode::Dodoes.to_cell());
}

#[test]
fn test_does_sees_own_body() {
    let (mut r, _) = runtime();
    eval(&mut r, ": addr ^dodoes entry does> ; addr p addr q");
    eval(&mut r, "p q p");
    let p = r.lookup("p").unwrap().unwrap();
    let q = r.lookup("q").unwrap().unwrap();
    let (p, q) = ((p + 2 * CELL) as Cell, (q + 2 * CELL) as Cell);
    assert_eq!(r.stack(), [p, q, p]);
}

#[test]
fn test_shuffle_idempotence() {
    let values = [0, 1, -1, 42, Cell::MIN, Cell::MAX];
    let (mut r, _) = runtime();
    for &a in &values {
        for &b in &values {
            r.push(a).unwrap();
            r.push(b).unwrap();
            eval(&mut r, "swap swap");
            assert_eq!(r.stack(), [a, b]);
            eval(&mut r, "dup drop");
            assert_eq!(r.stack(), [a, b]);
            eval(&mut r, "2drop");
        }
    }
}

#[test]
fn test_shuffles() {
    let (mut r, _) = runtime();
    eval(&mut r, "1 2 2 1+ rot");
    assert_eq!(r.stack(), [2, 3, 1]);
    eval(&mut r, "-rot -rot");
    assert_eq!(r.stack(), [3, 1, 2]);
    eval(&mut r, "nip under");
    assert_eq!(r.stack(), [2, 3, 2]);
    eval(&mut r, "over 0 ?dup 1 ?dup");
    assert_eq!(r.stack(), [2, 3, 2, 3, 0, 1, 1]);
}

#[test]
fn test_zero_exit() {
    let (mut r, _) = runtime();
    eval(&mut r, ": f 0; 1 ;");
    r.push(0).unwrap();
    eval(&mut r, "f");
    assert!(r.stack().is_empty());
    r.push(5).unwrap();
    eval(&mut r, "f");
    assert_eq!(r.stack(), [5, 1]);
}

#[test]
fn test_exit_from_outer_interpreter() {
    let (mut r, out) = runtime();
    assert_eq!(eval(&mut r, "0 0; 2"), Event::EndOfInput);
    assert_eq!(r.stack(), [2]);
    assert_eq!(eval(&mut r, ";; 1 0;"), Event::EndOfInput);
    assert_eq!(r.stack(), [2, 1]);
    assert_eq!(out.take(), "");
}

#[test]
fn test_return_stack_words() {
    let (mut r, _) = runtime();
    eval(&mut r, ": t >r r r> + ;");
    r.push(5).unwrap();
    eval(&mut r, "t");
    assert_eq!(r.stack(), [10]);
    eval(&mut r, "(') dup execute");
    assert_eq!(r.stack(), [10, 10]);
}

#[test]
fn test_arithmetic() {
    let (mut r, _) = runtime();
    r.push(Cell::MAX).unwrap();
    eval(&mut r, "1+");
    assert_eq!(r.stack(), [Cell::MIN]);
    eval(&mut r, "-1 /");
    assert_eq!(r.stack(), [Cell::MIN]);
    eval(&mut r, "drop -1 1 u< -1 1 u> 2 1 - 0= 0 0< -1 0<");
    assert_eq!(r.stack(), [0, -1, 0, 0, -1]);
}

#[test]
fn test_division_by_zero() {
    let (mut r, out) = runtime();
    r.push(1).unwrap();
    assert_eq!(eval(&mut r, "0 /"), Event::Bye);
    assert_eq!(out.take(), "l0: division by zero\n");
    assert!(r.stack().is_empty());
}

#[test]
fn test_memory_words() {
    let (mut r, _) = runtime();
    r.push(-1).unwrap();
    eval(&mut r, "create v 0 , v ! v c@ v cell+ v - 2 cells");
    assert_eq!(r.stack(), [255, CELL as Cell, 2 * CELL as Cell]);
}

#[test]
fn test_stack_pointer() {
    let (mut r, _) = runtime();
    eval(&mut r, "sp@ s0 @ swap -");
    assert_eq!(r.stack(), [0]);
    eval(&mut r, "sp@ s0 @ swap -");
    assert_eq!(r.stack(), [0, CELL as Cell]);
}

#[test]
fn test_output() {
    let (mut r, out) = runtime();
    r.push(-3).unwrap();
    r.push(255).unwrap();
    r.push(65).unwrap();
    eval(&mut r, "emit blank emit h. . cr");
    assert_eq!(out.take(), "A ff -3 \n");
    eval(&mut r, "create s ,\" hello world\" s puts s count type");
    assert_eq!(out.take(), "hello worldhello world");
    eval(&mut r, ".( hi there) 1");
    assert_eq!(out.take(), "hi there");
    assert_eq!(r.stack(), [1]);
    eval(&mut r, "blank");
    assert_eq!(r.stack(), [1, 32]);
}

#[test]
fn test_string_literal_limit() {
    let (mut r, out) = runtime();
    let text = format!("create s ,\" {}\" 1", "x".repeat(256));
    assert_eq!(eval(&mut r, &text), Event::Bye);
    assert_eq!(out.take(), "l0: token too long\n");
    assert!(r.stack().is_empty());
    let text = format!("create t ,\" {}\" t c@", "x".repeat(255));
    assert_eq!(eval(&mut r, &text), Event::EndOfInput);
    assert_eq!(r.stack(), [255]);
}

#[test]
fn test_tick() {
    let (mut r, _) = runtime();
    eval(&mut r, ": t ['] dup ; t (') nosuch (') swap");
    assert_eq!(r.stack(), [xt(&r, "dup"), 0, xt(&r, "swap")]);
}

#[test]
fn test_find() {
    let (mut r, _) = runtime();
    eval(&mut r, ": find-next parse dup c@ 1+ allot count (find) ;");
    eval(&mut r, "find-next swap find-next nothing");
    assert_eq!(r.stack(), [xt(&r, "swap"), -1, 0]);
}

#[test]
fn test_words() {
    let (mut r, out) = runtime();
    eval(&mut r, ": square dup * ; words");
    let text = out.take();
    assert!(text.starts_with("square abort? word? "));
    assert!(text.contains(" dup "));
    assert!(text.ends_with(" abort\n"));
}

#[test]
fn test_args() {
    let (mut r, out) = runtime();
    r.set_args(&["one".to_string(), "two".to_string()]).unwrap();
    eval(&mut r, "argc argv cell+ @ count");
    let stack = r.stack();
    assert_eq!((stack[0], stack[2]), (2, 3));
    eval(&mut r, "type argv @ puts");
    assert_eq!(out.take(), "twoone");
}

#[test]
fn test_page_break_ends_comments() {
    let (mut r, _) = runtime();
    eval(
        &mut r,
        "\n line# page# \\ comment\x0c 1 line# page# ( open\x0c 2 page#",
    );
    assert_eq!(r.stack(), [1, 0, 1, 0, 1, 2, 2]);
}

#[test]
fn test_include() {
    let path = temp_source("include", "2 dup\n+ line#");
    let (mut r, _) = runtime();
    assert_eq!(
        eval(&mut r, &format!("1 include {}\nline#", path.display())),
        Event::EndOfInput
    );
    assert_eq!(r.stack(), [1, 4, 1, 1]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_error_in_include() {
    let path = temp_source("error", "1\n zzz 2");
    let (mut r, out) = runtime();
    r.set_abort_hook("quit").unwrap();
    assert_eq!(
        eval(&mut r, &format!("include {} 1", path.display())),
        Event::EndOfInput
    );
    assert_eq!(out.take(), "l1: not found: zzz\n");
    assert!(r.stack().is_empty());
    assert!(r.scopes.is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_include() {
    let (mut r, out) = runtime();
    assert_eq!(eval(&mut r, "include /nonexistent/mind/lib.mind"), Event::Bye);
    assert_eq!(out.take(), "l0: file not found\n");
}

#[test]
fn test_bye() {
    let (mut r, _) = runtime();
    assert_eq!(eval(&mut r, "1 bye 2"), Event::Bye);
    assert_eq!(r.stack(), [1]);
}

#[test]
fn test_interrupt() {
    let (mut r, out) = runtime();
    let flag = Arc::new(AtomicBool::new(true));
    r.set_interrupt(flag.clone());
    assert_eq!(eval(&mut r, "1"), Event::Bye);
    assert_eq!(out.take(), "l0: interrupted\n");
    assert!(!flag.load(Ordering::SeqCst));
}

#[test]
fn test_interrupt_stops_deferred_loop() {
    let (mut r, out) = runtime();
    eval(&mut r, ": d ^dodefer entry ; d x (') x (') x >doer !");
    let flag = Arc::new(AtomicBool::new(false));
    r.set_interrupt(flag.clone());
    let raiser = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(100));
        flag.store(true, Ordering::SeqCst);
    });
    assert_eq!(eval(&mut r, "x"), Event::Bye);
    raiser.join().unwrap();
    assert_eq!(out.take(), "l0: interrupted\n");
}

#[test]
fn test_checked_stack_overflow() {
    let (mut r, out) = boot(Config {
        stack_cells: 4,
        ..Config::default()
    });
    eval(&mut r, "1 1 1 1 1");
    assert_eq!(out.take(), "l0: stack overflow\n");
    assert!(r.stack().is_empty());
}

#[test]
fn test_checked_underflow() {
    let (mut r, out) = runtime();
    assert_eq!(eval(&mut r, "drop"), Event::Bye);
    assert_eq!(out.take(), "l0: stack underflow\n");
}

#[test]
fn test_runaway_recursion() {
    let (mut r, out) = runtime();
    eval(&mut r, ": f f ; f");
    assert_eq!(out.take(), "l0: return stack overflow\n");
}

#[test]
fn test_unchecked_underflow() {
    let (mut r, out) = boot(Config {
        checked: false,
        ..Config::default()
    });
    assert_eq!(eval(&mut r, "drop"), Event::EndOfInput);
    assert_eq!(r.depth(), -1);
    assert_eq!(out.take(), "");
    assert_eq!(eval(&mut r, &"drop ".repeat(15)), Event::EndOfInput);
    assert_eq!(eval(&mut r, "dup"), Event::Bye);
    assert_eq!(out.take(), "l0: invalid address\n");
    assert_eq!(r.depth(), 0);
}

#[test]
fn test_unchecked_recursion_traps() {
    let (mut r, out) = boot(Config {
        checked: false,
        ..Config::default()
    });
    assert_eq!(eval(&mut r, ": f f ; f"), Event::Bye);
    assert_eq!(out.take(), "l0: invalid address\n");
}

#[test]
fn test_unchecked_runaway_leaves_machine_intact() {
    let (mut r, out) = boot(Config {
        checked: false,
        ..Config::default()
    });
    r.set_abort_hook("quit").unwrap();
    eval(&mut r, ": f f ;");
    let latest = r.dictionary().latest(r.memory()).unwrap();
    let here = r.dictionary().here(r.memory()).unwrap();
    assert_eq!(eval(&mut r, "f"), Event::EndOfInput);
    assert_eq!(out.take(), "l0: invalid address\n");
    assert_eq!(r.dictionary().latest(r.memory()).unwrap(), latest);
    assert_eq!(r.dictionary().here(r.memory()).unwrap(), here);
    eval(&mut r, "1 2 +");
    assert_eq!(r.stack(), [3]);

    let mut pushed = 0;
    let error = loop {
        match r.push(7) {
            Ok(()) => pushed += 1,
            Err(error) => break error,
        }
    };
    assert!(error.is(crate::lang::ErrorCode::InvalidAddress));
    assert_eq!(pushed, 256 + 16 - 1);
    assert_eq!(r.dictionary().here(r.memory()).unwrap(), here);
    eval(&mut r, "drop drop");
    assert_eq!(r.depth(), 256 + 16 - 2);
}

#[test]
fn test_styled_diagnostic() {
    let (mut r, out) = boot(Config {
        styled: true,
        ..Config::default()
    });
    eval(&mut r, "zzz");
    assert_eq!(out.take(), "\u{1b}[1ml0: not found: zzz\u{1b}[0m\n");
}
