pub mod pipeline;
pub mod somasim_commands;
