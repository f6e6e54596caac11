//! Integration tests: workspace, components, clips and tabs together
//!
//! These follow an editing session end to end:
//!   open tab -> place blocks -> drag them into chains -> move / delete
//!   -> group into a component -> place it on the timeline

#[cfg(test)]
mod tests {
    use crate::categories::{BlockKind, BlockPayload, MovieLoadingPayload};
    use crate::chain::ChainError;
    use crate::config::EditorConfig;
    use crate::core::{BlockContext, BlockId, IdGenerator, KindRegistry, Position, ProjectId, TabId};
    use crate::navigation::{HistoryKind, Tabs};
    use crate::project::{Clips, Component, Project};
    use crate::workspace::{Workspace, WorkspaceError};

    fn workspace(seed: u64) -> Workspace {
        Workspace::with_parts(
            EditorConfig::default(),
            KindRegistry::with_builtin_kinds(),
            IdGenerator::seeded(seed),
        )
    }

    fn at(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    /// Drop blocks one below the other and check the chain they form.
    fn drop_below(ws: &mut Workspace, block: BlockId, parent: BlockId) {
        let target = ws.block(parent).unwrap().position.offset(10.0, 40.0);
        let mut session = ws.begin_drag(block).unwrap();
        assert_eq!(ws.drag_to(&mut session, target).unwrap(), Some(parent));
        ws.end_drag(session).unwrap().unwrap();
    }

    // ====================================================================
    // Editing session on one tab
    // ====================================================================

    #[test]
    fn test_build_move_and_delete_a_chain() {
        let mut ws = workspace(100);
        let mut tabs = Tabs::new();
        let defaults = ws.config().default_tab.clone();
        let tab = tabs.init(ws.ids_mut(), &defaults);

        let hat = ws.add_block(BlockKind::DefineComponent, at(0.0, 0.0), Some(tab)).unwrap();
        let movie = ws.add_block(BlockKind::MovieLoading, at(300.0, 0.0), Some(tab)).unwrap();
        let gray = ws.add_block(BlockKind::GrayScaleFilter, at(300.0, 200.0), Some(tab)).unwrap();
        let debug = ws.add_block(BlockKind::Debug, at(600.0, 200.0), Some(tab)).unwrap();

        drop_below(&mut ws, movie, hat);
        drop_below(&mut ws, gray, movie);
        drop_below(&mut ws, debug, gray);

        assert_eq!(ws.chain_of(debug).unwrap(), vec![hat, movie, gray, debug]);
        for id in [movie, gray, debug] {
            assert_eq!(ws.block(id).unwrap().top_uuid(), hat);
        }
        assert_eq!(ws.block(debug).unwrap().position, at(0.0, 111.0));
        assert!(ws.validate().valid);

        // moving any member moves the whole chain
        ws.move_chain(gray, 50.0, -10.0).unwrap();
        assert_eq!(ws.block(hat).unwrap().position, at(50.0, -10.0));
        assert_eq!(ws.block(debug).unwrap().position, at(50.0, 101.0));

        // deleting the middle closes the gap
        ws.remove_block(gray).unwrap();
        assert_eq!(ws.chain_of(hat).unwrap(), vec![hat, movie, debug]);
        assert!(ws.validate().valid);

        let removed = ws.remove_chain(debug).unwrap();
        assert_eq!(removed.len(), 3);
        assert!(ws.is_empty());
        assert_eq!(tabs.len(), 1);
    }

    #[test]
    fn test_drag_out_of_middle_takes_the_tail() {
        let mut ws = workspace(101);
        let a = ws.add_block(BlockKind::MovieLoading, at(0.0, 0.0), None).unwrap();
        let b = ws.add_block(BlockKind::GrayScaleFilter, at(0.0, 0.0), None).unwrap();
        let c = ws.add_block(BlockKind::Debug, at(0.0, 0.0), None).unwrap();
        ws.attach(b, c).unwrap();
        ws.attach(a, b).unwrap();

        let mut session = ws.begin_drag(b).unwrap();
        assert_eq!(session.members(), &[b, c]);
        ws.drag_to(&mut session, at(500.0, 500.0)).unwrap();
        assert_eq!(ws.end_drag(session).unwrap(), None);

        assert_eq!(ws.chain_of(a).unwrap(), vec![a]);
        assert_eq!(ws.chain_of(c).unwrap(), vec![b, c]);
        assert_eq!(ws.block(c).unwrap().top_uuid(), b);
        assert!(ws.validate().valid);
    }

    #[test]
    fn test_samples_are_read_only_templates() {
        let mut ws = workspace(102);
        let sample = ws.add_sample(BlockKind::BlurFilter, at(0.0, 0.0)).unwrap();
        let real = ws.add_block(BlockKind::MovieLoading, at(0.0, 0.0), None).unwrap();

        assert_eq!(ws.attach(real, sample), Err(WorkspaceError::SampleBlock(sample)));
        assert_eq!(ws.attach(sample, real), Err(WorkspaceError::SampleBlock(sample)));
        assert!(ws.block(sample).unwrap().is_sample());
    }

    #[test]
    fn test_samples_stay_out_of_tabs() {
        let mut ws = workspace(109);
        let (uuid, tab): (BlockId, TabId) = (ws.ids_mut().mint(), ws.ids_mut().mint());
        assert_eq!(
            ws.insert_block(BlockContext::new(BlockKind::Debug, uuid).in_tab(tab).sample()),
            Err(WorkspaceError::SampleInTab { block: uuid, tab })
        );
        assert!(ws.block(uuid).is_none());
    }

    // ====================================================================
    // Restoring a persisted canvas
    // ====================================================================

    #[test]
    fn test_restore_then_validate() {
        let mut ids = IdGenerator::seeded(103);
        let (a, b): (BlockId, BlockId) = (ids.mint(), ids.mint());
        let mut ws = workspace(104);

        let movie = BlockPayload::MovieLoading(MovieLoadingPayload {
            material_path: Some("clips/intro.mp4".to_string()),
        });
        ws.insert_block(
            BlockContext::new(BlockKind::MovieLoading, a)
                .linked(a, None, Some(b))
                .with_payload(movie.clone()),
        )
        .unwrap();
        ws.insert_block(BlockContext::new(BlockKind::Debug, b).linked(a, Some(a), None))
            .unwrap();

        assert!(ws.validate().valid);
        assert_eq!(ws.block(a).unwrap().payload(), &movie);
        assert_eq!(
            ws.insert_block(BlockContext::new(BlockKind::Debug, b)),
            Err(WorkspaceError::DuplicateBlock(b))
        );
    }

    #[test]
    fn test_restored_dangling_pointer_is_reported() {
        let mut ids = IdGenerator::seeded(105);
        let (a, ghost): (BlockId, BlockId) = (ids.mint(), ids.mint());
        let mut ws = workspace(106);
        ws.insert_block(BlockContext::new(BlockKind::Debug, a).linked(a, None, Some(ghost)))
            .unwrap();

        let report = ws.validate();
        assert!(!report.valid);
        assert_eq!(report.errors[0].block_id, Some(a));
        assert_eq!(
            ws.family(a),
            Err(WorkspaceError::Chain(ChainError::BrokenChain { from: a, missing: ghost }))
        );
    }

    // ====================================================================
    // Components and clips
    // ====================================================================

    #[test]
    fn test_component_on_the_timeline() {
        let mut ws = workspace(107);
        let hat = ws.add_block(BlockKind::DefineComponent, at(0.0, 0.0), None).unwrap();
        let blur = ws.add_block(BlockKind::BlurFilter, at(0.0, 0.0), None).unwrap();
        ws.attach(hat, blur).unwrap();

        let mut component = Component::new(ws.ids_mut().mint(), "Component 1");
        for id in ws.chain_of(hat).unwrap() {
            let block = ws.block(id).unwrap().clone();
            component.blocks.insert(id, block);
        }
        let family = component.family(hat).unwrap();
        assert_eq!(family.keys().copied().collect::<Vec<_>>(), vec![hat, blur]);

        let project = Project::new(ws.ids_mut().mint(), "Demo");
        let defaults = ws.config().default_clip.clone();
        let mut clips = Clips::new();
        let clip = clips.add_for_component(&component, project.uuid, ws.ids_mut(), &defaults);

        let elsewhere: ProjectId = ws.ids_mut().mint();
        assert_eq!(clips.filtered(project.uuid).len(), 1);
        assert!(clips.filtered(elsewhere).is_empty());
        assert_eq!(clips.get(clip).unwrap().name, "Component 1");
    }

    // ====================================================================
    // Configuration
    // ====================================================================

    #[test]
    fn test_config_changes_pitch_and_first_tab() {
        let config = EditorConfig::from_json_str(
            r#"{"block_height": 50.0, "default_tab": {"kind": "Projects", "title": "Projects", "location": "/projects"}}"#,
        )
        .unwrap();
        let mut ws = Workspace::with_parts(config, KindRegistry::default(), IdGenerator::seeded(108));

        let a = ws.add_block(BlockKind::MovieLoading, at(0.0, 0.0), None).unwrap();
        let b = ws.add_block(BlockKind::Debug, at(400.0, 400.0), None).unwrap();
        drop_below(&mut ws, b, a);
        assert_eq!(ws.block(b).unwrap().position, at(0.0, 50.0));

        let mut tabs = Tabs::new();
        let defaults = ws.config().default_tab.clone();
        tabs.init(ws.ids_mut(), &defaults);
        let page = tabs.current().unwrap().history.current();
        assert_eq!(page.kind, HistoryKind::Projects);
        assert_eq!(page.location, "/projects");
    }
}
