mod window_event;

pub(crate) use window_event::translate_window_event;
