use std::{
    env, fs,
    path::PathBuf,
    process::{Command, Output},
};

use pretty_assertions::assert_eq;

fn call_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scale-wheel"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout_of(args: &[&str]) -> String {
    let output = call_cli(args);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn temp_file(name: &str, content: &str) -> PathBuf {
    let location = env::temp_dir().join(format!("scale-wheel-{}-{name}", std::process::id()));
    fs::write(&location, content).unwrap();
    location
}

#[test]
fn print_d_major() {
    let output = stdout_of(&["scale", "D"]);
    assert!(output.starts_with("D major\n"));
    assert!(output.contains(" 1 | D  | D 4     | MIDI  62 | whole\n"));
    assert!(output.contains(" 3 | F♯ | F#/Gb 4 | MIDI  66 | half\n"));
    assert_eq!(output.lines().count(), 9);
}

#[test]
fn tonic_given_by_index() {
    assert_eq!(stdout_of(&["scale", "4"]), stdout_of(&["scale", "G"]));
}

#[test]
fn tonic_index_out_of_range() {
    let output = call_cli(&["scale", "9"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Tonic index 9 is out of range 0..=6"));
}

#[test]
fn unknown_letter() {
    let output = call_cli(&["code", "H"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid note letter"));
}

#[test]
fn print_f_minor_as_yaml() {
    let output = stdout_of(&["scale", "f", "--minor", "--yaml"]);
    assert!(output.contains("type: Scale"));
    assert!(output.contains("tonic: F"));
    assert!(output.contains("mode: Minor"));
    assert!(output.contains("accidental: Flat"));
    assert!(output.contains("midi_number: 68"));
}

#[test]
fn print_code_listing() {
    assert_eq!(
        stdout_of(&["code", "G", "--minor"]),
        "playSound(67)  # G\n\
         playSound(69)  # A\n\
         playSound(70)  # B♭\n\
         playSound(72)  # C\n\
         playSound(74)  # D\n\
         playSound(75)  # E♭\n\
         playSound(77)  # F\n\
         playSound(79)  # G\n"
    );
}

#[test]
fn drag_a_quarter_turn_clockwise() {
    assert_eq!(
        stdout_of(&["drag", "C", "--path", "50,19", "70,39"]),
        "tonic: A\nmode: major\nrotation: 90.00\n"
    );
}

#[test]
fn drag_on_a_scaled_display() {
    assert_eq!(
        stdout_of(&["drag", "C", "--path", "100,38", "140,78", "--scale", "2"]),
        "tonic: A\nmode: major\nrotation: 90.00\n"
    );
}

#[test]
fn drag_outside_the_wheel_does_not_rotate() {
    assert_eq!(
        stdout_of(&["drag", "E", "--minor", "--path", "90,120", "95,130"]),
        "tonic: E\nmode: minor\nrotation: 0.00\n"
    );
}

#[test]
fn drag_rejects_non_finite_coordinates() {
    let output = call_cli(&["drag", "C", "--path", "50,19", "NaN,39"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expected a finite number"));

    let output = call_cli(&["drag", "C", "--path", "50,19", "70,39", "--scale", "inf"]);
    assert!(!output.status.success());
}

#[test]
fn svg_rejects_non_finite_rotation() {
    for rotation in ["inf", "-inf", "NaN"] {
        let output = call_cli(&["svg", "C", "--rotation", rotation]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Expected a finite number"));
    }
}

#[test]
fn render_svg() {
    let output = stdout_of(&["svg", "C"]);
    assert!(output.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 145">"#));
    assert!(output.contains(r#"<g class="layer-wheel">"#));
    assert!(output.contains(">Major Scales</text>"));
    assert!(output.contains(">playSound(60)</text>"));
    assert!(output.trim_end().ends_with("</svg>"));
}

#[test]
fn render_rotated_svg() {
    let output = stdout_of(&["svg", "C", "--rotation", "90"]);
    assert!(output.contains(r#"<g class="layer-wheel" transform="matrix("#));
    assert!(output.contains(">playSound(69)</text>"));
}

#[test]
fn write_to_output_file() {
    let location = temp_file("listing.txt", "");
    let location_arg = location.to_str().unwrap();

    let output = stdout_of(&["--of", location_arg, "code", "A", "--minor"]);
    assert_eq!(output, "");
    assert!(fs::read_to_string(&location)
        .unwrap()
        .starts_with("playSound(69)  # A\n"));
}

#[test]
fn layout_profile() {
    let location = temp_file("profile.yml", "button:\n  width: 40\n");
    let output = stdout_of(&["svg", "C", "--profile", location.to_str().unwrap()]);
    assert!(output.contains(r#"width="40" height="10""#));
}

#[test]
fn broken_layout_profile() {
    let location = temp_file("broken.yml", "wheel: [1, 2\n");
    let output = call_cli(&["svg", "C", "--profile", location.to_str().unwrap()]);
    assert!(!output.status.success());
}
