// Dweve EDI - Schema-driven EDI segment tree parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
    Ok(())
}

/// Installation instructions for the `edi` completions of `shell`.
///
/// Shell names are case-insensitive; unknown shells yield
/// `"Unsupported shell"`.
///
/// # Examples
///
/// ```
/// use edi_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("zsh").contains("_edi"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => r#"# Bash: current session
eval "$(edi completion bash)"

# Bash: every session
edi completion bash > ~/.local/share/bash-completion/completions/edi
"#
        .to_string(),
        "zsh" => r#"# Zsh: current session
eval "$(edi completion zsh)"

# Zsh: every session (directory must be in $fpath)
edi completion zsh > ~/.zsh/completions/_edi
"#
        .to_string(),
        "fish" => r#"# Fish: picked up by new sessions
edi completion fish > ~/.config/fish/completions/edi.fish
"#
        .to_string(),
        "powershell" | "pwsh" => r#"# PowerShell: run now, or add to the file named by $PROFILE
edi completion powershell | Out-String | Invoke-Expression
"#
        .to_string(),
        "elvish" => r#"# Elvish: run now, or add to ~/.elvish/rc.elv
eval (edi completion elvish)
"#
        .to_string(),
        _ => "Unsupported shell".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_instructions_mention_shell() {
        for shell in ["bash", "zsh", "fish", "elvish"] {
            let instructions = print_installation_instructions(shell);
            assert!(instructions.contains(&format!("edi completion {}", shell)), "{}", shell);
        }
        assert!(print_installation_instructions("pwsh").contains("Invoke-Expression"));
    }

    #[test]
    fn test_installation_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("bash"),
            print_installation_instructions("BaSh")
        );
    }

    #[test]
    fn test_installation_instructions_unsupported() {
        assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
    }
}
