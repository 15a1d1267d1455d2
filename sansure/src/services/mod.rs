mod dispatcher;

pub use dispatcher::ModeDispatcher;
