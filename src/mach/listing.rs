use super::Tape;
use crate::lang::FileId;

/// ## Tape dump
///
/// One `index: opcode` line per instruction, optionally restricted to the
/// instructions that came from one source file.

#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    tape: &'a Tape,
    file: Option<FileId>,
}

impl<'a> Listing<'a> {
    pub fn new(tape: &'a Tape) -> Listing<'a> {
        Listing { tape, file: None }
    }

    pub fn only(self, file: FileId) -> Listing<'a> {
        Listing {
            file: Some(file),
            ..self
        }
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (index, instruction) in self.tape.iter().enumerate() {
            if let Some(file) = self.file {
                if instruction.loc.file != file {
                    continue;
                }
            }
            writeln!(f, "{}: {}", index, instruction.opcode)?;
        }
        Ok(())
    }
}
