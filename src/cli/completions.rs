use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bundle-deploy completions bash > ~/.bash_completion.d/bundle-deploy\n\n\
                  Generate zsh completions:\n    bundle-deploy completions zsh > ~/.zfunc/_bundle-deploy\n\n\
                  Generate fish completions:\n    bundle-deploy completions fish > ~/.config/fish/completions/bundle-deploy.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
