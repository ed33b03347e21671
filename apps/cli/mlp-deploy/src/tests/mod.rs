mod deploy;
mod logger;
