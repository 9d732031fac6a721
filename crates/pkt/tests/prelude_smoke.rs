//! The prelude is enough to run an edit and a command read end to end.

use pkt::prelude::*;

#[test]
fn edit_then_command_through_the_prelude() -> Result<()> {
    let mut term = Terminal::headless(b"K1ABC\rlist\r".to_vec(), 60);
    let mut to = SimpleField::new("To", "");
    let result = FieldEditor::new(8).edit(&mut term, &mut to)?;
    assert_eq!(result, EditResult::Next);
    assert_eq!(to.value(), "K1ABC");

    let mut reader = CommandLineReader::new();
    assert_eq!(reader.read_command(&mut term)?, "list");
    Ok(())
}

#[test]
fn aborted_edit_converts_to_a_user_exit() {
    let mut term = Terminal::headless(b"K1\x03".to_vec(), 60);
    let mut to = SimpleField::new("To", "");
    let err: Error = FieldEditor::new(8).edit(&mut term, &mut to).unwrap_err().into();
    assert!(err.is_user_exit());
}
