pub mod assemble;
pub mod format;
pub mod parse;
pub mod track;
