mod bus;
mod factory;
mod jobs;

pub use bus::{
    codes, Command, CommandContext, CommandError, CommandHandler, CommandRegistry,
    CommandRegistryBuilder, GenericCommandService,
};
pub use factory::JobCommandRegistryFactory;
pub use jobs::{
    AppendSegmentsCommand, AppendSegmentsCommandHandler, CreateJobCommand,
    CreateJobCommandHandler, GetJobCommand, GetJobCommandHandler, ListJobsCommand,
    ListJobsCommandHandler, UpdateJobCommand, UpdateJobCommandHandler,
};
