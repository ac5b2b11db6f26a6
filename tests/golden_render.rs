use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use sketch_canvas::{Canvas, Pattern, Point, Rectangle};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(format!("{}.sha256", name));
    p
}

fn pattern(s: &str) -> Pattern {
    Pattern::parse(s).expect("fixture pattern")
}

fn rect(c: &mut Canvas, x: i64, y: i64, w: u32, h: u32, fill: &str, outline: &str) {
    c.draw_rect(&Rectangle::new(Point::new(x, y), w, h), pattern(fill), pattern(outline))
        .expect("fixture rectangle");
}

/// Compare the rendered canvas against a content digest stored on disk.
fn check_golden(name: &str, canvas: &mut Canvas) {
    let rendered = canvas.render();
    let digest = hex::encode(Sha256::digest(rendered.as_bytes()));

    let expected_path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim(), "render of {} changed:\n{}", name, rendered);
}

#[test]
fn golden_two_rectangles() {
    let mut c = Canvas::new("", 24, 9);
    rect(&mut c, 3, 2, 5, 3, "X", "@");
    rect(&mut c, 10, 3, 14, 6, "O", "X");
    check_golden("two_rectangles", &mut c);
}

#[test]
fn golden_overlapping_layers() {
    let mut c = Canvas::new("", 21, 8);
    rect(&mut c, 14, 0, 7, 6, ".", "");
    rect(&mut c, 0, 3, 8, 4, "", "O");
    rect(&mut c, 5, 5, 5, 3, "X", "X");
    check_golden("overlapping_layers", &mut c);

    c.flood_fill(Point::new(0, 0), pattern("~")).expect("flood fill");
    check_golden("overlapping_layers_flooded", &mut c);
}

#[test]
fn golden_overlapping_layers_rows() {
    // Readable copy of the flooded fixture so a digest mismatch is easy to diagnose.
    let mut c = Canvas::new("", 21, 8);
    rect(&mut c, 14, 0, 7, 6, ".", "");
    rect(&mut c, 0, 3, 8, 4, "", "O");
    rect(&mut c, 5, 5, 5, 3, "X", "X");
    c.flood_fill(Point::new(0, 0), pattern("~")).expect("flood fill");

    assert_eq!(
        c.split(),
        vec![
            "~~~~~~~~~~~~~~.......",
            "~~~~~~~~~~~~~~.......",
            "~~~~~~~~~~~~~~.......",
            "OOOOOOOO~~~~~~.......",
            "O------O~~~~~~.......",
            "O----XXXXX~~~~.......",
            "OOOOOXXXXX~~~~~~~~~~~",
            "-----XXXXX~~~~~~~~~~~",
        ]
    );
}
