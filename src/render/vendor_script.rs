//! Builds the re-vendoring script from a [`RenderContext`].
//!
//! The emitted script walks through a fixed sequence: create a throwaway
//! GOPATH, clear `vendor/`, symlink the project under its own import path,
//! `go get` every external import while capturing the output, move the
//! fetched tree into `vendor/`, optionally register each fetched repository
//! as a git submodule, and clean up. This module only produces the text; the
//! user's shell runs it.

use crate::domain::RenderContext;
use crate::render::shell::{render, Stmt};

/// Render the vendor script to text.
pub fn render_vendor_script(ctx: &RenderContext) -> String {
    render(&vendor_script(ctx))
}

/// Build the script's statement sequence.
pub fn vendor_script(ctx: &RenderContext) -> Vec<Stmt> {
    let cwd = &ctx.cwd;
    let prefix = &ctx.package_prefix;

    let mut stmts = vec![
        Stmt::comment("Automatically abort on error"),
        Stmt::cmd("set -e"),
        Stmt::Blank,
        Stmt::comment(
            "Create a temporary directory to simulate an empty GOPATH. 'go get' will\n\
             download the dependencies into this path where we later copy them from.",
        ),
        Stmt::assign("tmpDir", "\"$(mktemp --directory)\""),
        Stmt::Blank,
        Stmt::comment("Remove currently installed vendored dependencies"),
        Stmt::cmd(format!("rm -rf {cwd}/vendor/*")),
        Stmt::Blank,
        Stmt::comment("Set up the environment for 'go get'"),
        Stmt::export("GO15VENDOREXPERIMENT", "0"),
        Stmt::export("GOPATH", "$tmpDir"),
        Stmt::Blank,
        Stmt::comment("Link the temporary GOPATH to the current package"),
        Stmt::cmd(format!("mkdir -p $GOPATH/src/{prefix}")),
        Stmt::cmd(format!("rm -r $GOPATH/src/{prefix}")),
        Stmt::cmd(format!("ln -s {cwd} $GOPATH/src/{prefix}")),
        Stmt::Blank,
        Stmt::cmd(format!("cd $GOPATH/src/{prefix}")),
        Stmt::Blank,
        Stmt::comment("Download dependencies into the temporary directory"),
        Stmt::assign("installedPackagesStr", "\"\""),
    ];

    for pkg in &ctx.packages {
        stmts.push(Stmt::append(
            "installedPackagesStr",
            format!("\"$(go get -d -v -t {pkg} 2>&1)\""),
        ));
        stmts.push(Stmt::append("installedPackagesStr", "$'\\n'"));
    }

    stmts.extend([
        Stmt::Blank,
        Stmt::comment("Remove the symlink again"),
        Stmt::cmd(format!("rm -rf $GOPATH/src/{prefix}")),
        Stmt::Blank,
        Stmt::comment("Move vendored dependencies from temporary storage into the current project"),
        Stmt::cmd(format!("rsync -r $tmpDir/src/ {cwd}/vendor")),
        Stmt::Blank,
    ]);

    if ctx.add_submodules {
        stmts.extend(submodule_stanza(cwd));
    } else {
        stmts.push(Stmt::comment("Adding submodules is disabled"));
    }

    stmts.extend([
        Stmt::Blank,
        Stmt::comment("Remove the temporary package installation directory"),
        Stmt::cmd("rm -rf $tmpDir"),
    ]);

    stmts
}

/// The submodule-registration loop over the captured `go get` output.
///
/// Idempotent at script runtime: packages without a resolvable remote URL are
/// skipped, and the manual `.gitmodules` append only fires when `submodule
/// add` did not already register the path.
fn submodule_stanza(cwd: &str) -> Vec<Stmt> {
    vec![
        Stmt::comment("Capture the currently used working directory"),
        Stmt::assign("cwd", format!("\"{cwd}/\"")),
        Stmt::Blank,
        Stmt::ForLines {
            array: "installedPackages".to_string(),
            source: "installedPackagesStr".to_string(),
            item: "entry".to_string(),
            body: vec![
                Stmt::comment("The array may contain empty elements which we want to filter out"),
                Stmt::assign("entry", "\"$(echo \"$entry\" | tr -d '\\n')\""),
                Stmt::If {
                    condition: "[[ -z \"$entry\" ]]".to_string(),
                    body: vec![Stmt::Continue],
                },
                Stmt::Blank,
                Stmt::comment(
                    "'go get' prints lines such as 'github.com/x/y (download)' but only\n\
                     the leading import path matters here",
                ),
                Stmt::assign("pkg", "\"$(echo \"$entry\" | cut -d' ' -f 1)\""),
                Stmt::Blank,
                Stmt::comment(
                    "Find a remote URL which can be used to add this package as a submodule",
                ),
                Stmt::assign(
                    "remoteUrl",
                    format!(
                        "\"$(git -C {cwd}/vendor/$pkg config --get remote.origin.url || true)\""
                    ),
                ),
                Stmt::If {
                    condition: "[ -n \"$remoteUrl\" ]".to_string(),
                    body: vec![
                        Stmt::comment(
                            "Resolve the repository toplevel so whole repositories are\n\
                             registered, not individual subpackages",
                        ),
                        Stmt::assign(
                            "toplevelDir",
                            format!("\"$(git -C {cwd}/vendor/$pkg rev-parse --show-toplevel)\""),
                        ),
                        Stmt::assign("resolvedDir", "\"${toplevelDir#\"$cwd\"}\""),
                        Stmt::cmd(format!(
                            "git -C \"{cwd}\" submodule add -f $remoteUrl \"$resolvedDir\" || true"
                        )),
                        Stmt::Blank,
                        Stmt::comment(
                            "Register the path manually if 'submodule add' did not update .gitmodules",
                        ),
                        Stmt::OrElse {
                            command: format!(
                                "grep -q \"path = $resolvedDir\" \"{cwd}/.gitmodules\""
                            ),
                            body: vec![
                                Stmt::cmd(format!(
                                    "echo \"[submodule \\\"vendor/$pkg\\\"]\" >> \"{cwd}/.gitmodules\""
                                )),
                                Stmt::cmd(format!(
                                    "echo \"\tpath = $resolvedDir\" >> \"{cwd}/.gitmodules\""
                                )),
                                Stmt::cmd(format!(
                                    "echo \"\turl = $remoteUrl\" >> \"{cwd}/.gitmodules\""
                                )),
                            ],
                        },
                    ],
                },
            ],
        },
    ]
}
