mod helpers;
mod stats_client;
