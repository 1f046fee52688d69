pub mod drag_intent;
