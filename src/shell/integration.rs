//! Functions that emit data for the wrapping shell function.

use crate::core::route::EditRoute;

const EDIT_PREFIX: &str = "__CV_EDIT__=";

/// Emit the machine-readable exit payload for shell wrappers.
pub fn print_exit_payload(edit: Option<&EditRoute>) {
    if let Some(route) = edit {
        println!("{EDIT_PREFIX}{}", route.path());
    }
}

/// Returns the bash function that users should add to their `.bashrc`.
///
/// The function name is `cv` and it invokes the binary by its package name
/// (read from `Cargo.toml` at compile time). When the user activates an
/// edit action, the wrapper opens `$CATVIEW_ADMIN_URL/<route>` in a browser,
/// or just echoes the route when no base URL is configured.
pub fn bash_function() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        r#"
# ── {bin}: catalog category browser ────────────────────────
# Browse with `cv`.  Activating Edit on a row opens the matching admin
# page after the TUI exits.
cv() {{
    local output
    output="$(command {bin} "$@")"
    local exit_code=$?
    local route=""
    while IFS= read -r line; do
        case "$line" in
            {EDIT_PREFIX}*) route="${{line#{EDIT_PREFIX}}}" ;;
        esac
    done <<< "$output"
    if [ $exit_code -eq 0 ] && [ -n "$route" ]; then
        if [ -n "$CATVIEW_ADMIN_URL" ]; then
            xdg-open "${{CATVIEW_ADMIN_URL%/}}/$route" >/dev/null 2>&1 ||
                open "${{CATVIEW_ADMIN_URL%/}}/$route" >/dev/null 2>&1
        else
            printf 'edit: %s\n' "$route"
        fi
    fi
}}
"#
    )
}

/// Returns the zsh function that users should add to their `.zshrc`.
pub fn zsh_function() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        r#"
# ── {bin}: catalog category browser ────────────────────────
# Browse with `cv`.  Activating Edit on a row opens the matching admin
# page after the TUI exits.
cv() {{
    local output
    output="$(command {bin} "$@")"
    local exit_code=$?
    local route=""
    while IFS= read -r line; do
        case "$line" in
            {EDIT_PREFIX}*) route="${{line#{EDIT_PREFIX}}}" ;;
        esac
    done <<< "$output"
    if [[ $exit_code -eq 0 ]] && [[ -n "$route" ]]; then
        if [[ -n "$CATVIEW_ADMIN_URL" ]]; then
            xdg-open "${{CATVIEW_ADMIN_URL%/}}/$route" >/dev/null 2>&1 ||
                open "${{CATVIEW_ADMIN_URL%/}}/$route" >/dev/null 2>&1
        else
            printf 'edit: %s\n' "$route"
        fi
    fi
}}
"#
    )
}
