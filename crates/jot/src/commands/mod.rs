use eyre::Result;

pub mod editor;
pub mod preferences;
pub mod shell;
pub mod todo;

pub trait Command {
    fn execute(&self) -> Result<()>;
}
