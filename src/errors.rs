// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidSaveFile(reason: String) {
            description("invalid save file")
            display("invalid save file: {}", reason)
        }

        InvalidDimensions(width: u8, height: u8, floors: u8) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}x{}: each must be within 1-255", width, height, floors)
        }

        MoveCountOverflow(moves: u32) {
            description("move count too large to save")
            display("move count {} does not fit the 16 bit save field", moves)
        }
    }
}

pub fn invalid_save_file<S: Into<String>>(reason: S) -> Error {
    ErrorKind::InvalidSaveFile(reason.into()).into()
}
