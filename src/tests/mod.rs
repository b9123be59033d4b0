#[cfg(test)]
mod page_property_tests {
    use crate::{PackageNode, PageRenderer, RenderContext};

    const ROOT: &str = "pwncat";

    fn render(node: &PackageNode) -> String {
        PageRenderer::new(RenderContext::new(ROOT))
            .render(node)
            .expect("well-formed node should render")
    }

    fn first_line(page: &str) -> &str {
        page.lines().next().unwrap_or_default()
    }

    fn flag_combinations() -> Vec<(bool, bool)> {
        vec![(false, false), (false, true), (true, false), (true, true)]
    }

    #[test]
    fn test_root_heading_ignores_flags() {
        for (is_namespace, module_first) in flag_combinations() {
            let node = PackageNode::new(ROOT)
                .namespace(is_namespace)
                .module_first(module_first);
            assert_eq!(first_line(&render(&node)), "API Documentation");
        }
    }

    #[test]
    fn test_non_root_heading_follows_namespace_flag() {
        for (is_namespace, module_first) in flag_combinations() {
            let node = PackageNode::new("pwncat.sub")
                .namespace(is_namespace)
                .module_first(module_first);
            let expected = if is_namespace {
                "pwncat.sub namespace"
            } else {
                "pwncat.sub package"
            };
            assert_eq!(first_line(&render(&node)), expected);
        }
    }

    #[test]
    fn test_namespace_heading_is_escaped() {
        let node = PackageNode::new("pwncat.my_ns").namespace(true);
        let page = render(&node);
        let mut lines = page.lines();
        assert_eq!(lines.next(), Some("pwncat.my\\_ns namespace"));
        assert_eq!(lines.next(), Some("=".repeat(23).as_str()));
    }

    #[test]
    fn test_automodule_present_iff_module_first_and_not_namespace() {
        for (is_namespace, module_first) in flag_combinations() {
            let node = PackageNode::new("pwncat.sub")
                .namespace(is_namespace)
                .module_first(module_first)
                .automodule_options(["members", "show-inheritance"]);
            let page = render(&node);
            let present = page.contains(".. automodule:: pwncat.sub\n");
            assert_eq!(
                present,
                module_first && !is_namespace,
                "is_namespace={} module_first={}",
                is_namespace,
                module_first
            );
            if present {
                assert!(page.contains(
                    ".. automodule:: pwncat.sub\n   :members:\n   :show-inheritance:\n"
                ));
            }
        }
    }

    #[test]
    fn test_toctree_present_iff_children() {
        let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (vec![], vec![]),
            (vec!["pkg.a"], vec![]),
            (vec![], vec!["pkg.b"]),
            (vec!["pkg.a"], vec!["pkg.b"]),
        ];

        for (subpackages, submodules) in cases {
            let expected = !subpackages.is_empty() || !submodules.is_empty();
            let node = PackageNode::new("pkg")
                .subpackages(subpackages)
                .submodules(submodules);
            let page = render(&node);
            assert_eq!(page.contains("Modules and Packages\n"), expected);
            assert_eq!(page.contains(".. toctree::\n"), expected);
        }
    }

    #[test]
    fn test_toctree_order_and_no_dedup() {
        let node = PackageNode::new("pkg")
            .subpackages(["pkg.b", "pkg.a"])
            .submodules(["pkg.c", "pkg.a"]);
        let page = render(&node);

        let entries: Vec<&str> = page
            .split(".. toctree::\n")
            .nth(1)
            .unwrap_or_default()
            .lines()
            .skip(2)
            .map(str::trim)
            .collect();
        assert_eq!(entries, vec!["pkg.b", "pkg.a", "pkg.c", "pkg.a"]);
    }

    #[test]
    fn test_max_depth_is_passed_through() {
        let node = PackageNode::new("pkg").submodules(["pkg.a"]).max_depth(0);
        assert!(render(&node).contains("   :maxdepth: 0\n"));

        let node = PackageNode::new("pkg").submodules(["pkg.a"]).max_depth(17);
        assert!(render(&node).contains("   :maxdepth: 17\n"));
    }

    #[test]
    fn test_page_ends_with_single_newline() {
        let nodes = vec![
            PackageNode::new("pkg"),
            PackageNode::new("pkg").module_first(true),
            PackageNode::new("pkg").submodules(["pkg.a"]),
        ];
        for node in nodes {
            let page = render(&node);
            assert!(page.ends_with('\n'));
            assert!(!page.ends_with("\n\n"));
            assert!(!page.contains("\n\n\n"));
        }
    }
}
