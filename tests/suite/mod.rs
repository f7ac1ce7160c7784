mod console;
mod fragments;
mod overlays;
mod scroll_lock;
