pub(crate) mod watch_face;
