//! End-to-end byte-stream scenarios driven through a full [`Terminal`].

use vtty_term::Terminal;
use vtty_term::escape::{Color, LineDimensions, Rgb};
use vtty_term::screen::{Cell, TermMode};

fn term() -> Terminal {
    Terminal::new(80, 24)
}

#[test]
fn clear_screen_and_home() {
    let mut terminal = term();
    terminal.advance(b"some junk\x1b[2J\x1b[H");

    let screen = terminal.screen();
    for y in 0..24 {
        for x in 0..80 {
            assert_eq!(*screen.cell(x, y), screen.cursor().attrs);
        }
    }
    assert_eq!((screen.cursor().x, screen.cursor().y), (0, 0));
}

#[test]
fn cursor_position_report() {
    let mut terminal = term();
    terminal.advance(b"\x1b[5;10H\x1b[6n");
    assert_eq!(terminal.output().as_slice(), b"\x1b[5;10R");
}

#[test]
fn origin_mode_with_scroll_region() {
    let mut terminal = term();
    terminal.advance(b"\x1b[?6h\x1b[2;5r\x1b[H");

    let screen = terminal.screen();
    assert!(screen.mode().contains(TermMode::DECOM));
    assert_eq!(screen.scroll_top(), 1);
    assert_eq!(screen.scroll_bottom(), 4);
    assert_eq!((screen.cursor().x, screen.cursor().y), (0, 1));
}

#[test]
fn delete_character_shifts_line() {
    let mut terminal = term();

    terminal.advance(b"A\x1b[4D");
    assert_eq!(
        (terminal.screen().cursor().x, terminal.screen().cursor().y),
        (0, 0)
    );

    terminal.advance(b"\x1b[PZ");
    assert_eq!(terminal.screen().line(0).text(), "Z");
    assert_eq!(
        (terminal.screen().cursor().x, terminal.screen().cursor().y),
        (1, 0)
    );
}

#[test]
fn screen_alignment_pattern() {
    let mut terminal = term();
    terminal.advance(b"\x1b#8");

    let screen = terminal.screen();
    for y in 0..24 {
        assert_eq!(screen.line(y).dimensions, LineDimensions::SingleWidth);
        for x in 0..80 {
            assert_eq!(screen.cell(x, y).code_point, 'E');
        }
    }
}

#[test]
fn shift_out_selects_g1_graphics() {
    let mut terminal = term();
    terminal.advance(b"\x1b)0\x0e\x60");
    assert_eq!(terminal.screen().cell(0, 0).code_point, '\u{25c6}');
}

#[test]
fn huge_cursor_position_is_clamped() {
    let mut terminal = term();
    terminal.advance(b"\x1b[999999;999999H\x1b[6n");
    assert_eq!(terminal.output().as_slice(), b"\x1b[24;80R");
}

#[test]
fn wrap_discipline_end_to_end() {
    let mut terminal = Terminal::new(10, 5);
    terminal.advance(b"\x1b[?7habcdefghij");

    assert_eq!(terminal.screen().cell(9, 0).code_point, 'j');
    assert!(terminal.screen().cursor().last_column);

    terminal.advance(b"k");
    assert_eq!(terminal.screen().line(0).text(), "abcdefghij");
    assert_eq!(terminal.screen().cell(0, 1).code_point, 'k');
    assert_eq!(
        (terminal.screen().cursor().x, terminal.screen().cursor().y),
        (1, 1)
    );
}

#[test]
fn overwrite_without_autowrap() {
    let mut terminal = Terminal::new(10, 5);
    terminal.advance(b"abcdefghijk");

    assert_eq!(terminal.screen().line(0).text(), "abcdefghik");
    assert_eq!(
        (terminal.screen().cursor().x, terminal.screen().cursor().y),
        (9, 0)
    );
}

#[test]
fn sgr_reset_restores_default_attributes() {
    let mut terminal = term();
    terminal.advance(b"\x1b[1;3;4;5;7;9;20;31;44;51;53;8m\x1b[0m");

    assert_eq!(terminal.screen().cursor().attrs, Cell::default());
    assert!(!terminal.screen().cursor().conceal);
}

#[test]
fn truecolor_round_trip() {
    let mut terminal = term();
    terminal.advance(b"\x1b[38;2;10;20;30mX");

    let cell = terminal.screen().cell(0, 0);
    assert_eq!(cell.code_point, 'X');
    assert_eq!(cell.foreground, Color::Rgb(Rgb::new(10, 20, 30)));
}

#[test]
fn scroll_region_round_trip() {
    let mut terminal = term();
    let top = terminal.screen().scroll_top();
    let bottom = terminal.screen().scroll_bottom();

    terminal.advance(b"\x1b[5;10r\x1b[r");
    assert_eq!(terminal.screen().scroll_top(), top);
    assert_eq!(terminal.screen().scroll_bottom(), bottom);
}

#[test]
fn mode_set_reset_round_trip() {
    let mut terminal = term();
    let mode = terminal.screen().mode();

    terminal.advance(b"\x1b[?7h\x1b[20h\x1b[?7l\x1b[20l");
    assert_eq!(terminal.screen().mode(), mode);
}

#[test]
fn save_restore_cursor_round_trip() {
    let mut terminal = term();
    terminal.advance(b"\x1b[10;20H\x1b[31m\x1b7\x1b[H\x1b[0m\x1b8");

    let cursor = terminal.screen().cursor();
    assert_eq!((cursor.x, cursor.y), (19, 9));
    assert_eq!(cursor.attrs.foreground, Color::Indexed(1));
}

#[test]
fn double_reset_equals_single_reset() {
    let mut terminal = term();
    terminal.advance(b"junk\x1b[?7h\x1b[5;6r");

    terminal.advance(b"\x1bc");
    let mode = terminal.screen().mode();
    let cursor = *terminal.screen().cursor();

    terminal.advance(b"\x1bc");
    assert_eq!(terminal.screen().mode(), mode);
    assert_eq!(*terminal.screen().cursor(), cursor);
}

#[test]
fn utf8_toggle_changes_decoding() {
    let mut terminal = term();

    // 8-bit passthrough by default.
    terminal.advance(b"\xc3\xa9");
    assert_eq!(terminal.screen().cell(0, 0).code_point, '\u{c3}');
    assert_eq!(terminal.screen().cell(1, 0).code_point, '\u{a9}');

    terminal.advance(b"\x1b[H\x1b%G\xc3\xa9");
    assert_eq!(terminal.screen().cell(0, 0).code_point, 'é');

    terminal.advance(b"\x1b%@");
    assert!(!terminal.screen().mode().contains(TermMode::UTF8));
}

#[test]
fn scrolling_inside_region_preserves_outside_rows() {
    let mut terminal = Terminal::new(10, 6);
    terminal.advance(b"top\x1b[6;1Hbottom\x1b[2;5r");

    // Fill the region and force it to scroll twice.
    terminal.advance(b"\x1b[5;1H\na\nb");

    assert_eq!(terminal.screen().line(0).text(), "top");
    assert_eq!(terminal.screen().line(5).text(), "bottom");
}

#[test]
fn vt52_round_trip_through_ansi_mode() {
    let mut terminal = term();
    terminal.advance(b"\x1b[?2l\x1bY\x28\x28X\x1b<\x1b[c");

    // The VT52 address put the cursor at row 8, column 8 and printed.
    assert_eq!(terminal.screen().cell(8, 8).code_point, 'X');
    // Back in ANSI mode, device attributes answer normally.
    assert_eq!(terminal.output().as_slice(), b"\x1b[?1;7c");
}

#[test]
fn malformed_sequences_never_poison_the_stream() {
    let mut terminal = term();
    terminal.advance(b"\x1b[999;;;;;;;9999zzz");
    terminal.advance(b"\x1b]junk without terminator\x18");
    terminal.advance(b"\x1bP1;2;3qdata\x1b\\");
    terminal.advance(b"ok");

    let text = terminal.screen().line(0).text();
    assert!(text.ends_with("ok"), "got {text:?}");
}
