pub(crate) mod model;
pub(crate) mod render_state;
pub(crate) mod reveal;
