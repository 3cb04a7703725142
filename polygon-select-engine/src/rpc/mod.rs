//! Notification channel from the selection tools to the host frontend.
//!
//! Messages follow JSON-RPC 2.0 notification framing so a web frontend can
//! consume them alongside its other RPC traffic.
//!
//! | Method | Params |
//! |---|---|
//! | `selection_tool_state_changed` | `{ tool, active }` |
//! | `selection_point_added` | `{ point_count, position: [lon, lat, height] }` |
//! | `selection_completed` | `{ feature_count, features: [{ tileset, batch_id }] }` |
//! | `selection_cancelled` | `{ reason }` |
//! | `feature_info_panel` | `{ visible }` |

pub mod notifications;
