pub mod plex_server;
