#[cfg(test)]
mod core_test {
    use crate::config::Config;
    use crate::device_camera::interface::CapturedPhoto;
    use crate::device_display::interface::{Button, DeviceDisplayEvent};
    use crate::device_gallery::interface::GalleryPick;
    use crate::device_permission::interface::PermissionStatus;
    use crate::error::PipelineError;
    use crate::image_classifier::interface::Classification;
    use crate::image_decoder::interface::PixelTensor;
    use crate::photo_classifier::core::{
        init, transition, ClassificationResult, Effect, ImageReference, LoadingStep, Model, Msg,
        PermissionState, PipelineState, Screen,
    };
    use crate::photo_classifier::render::{view, MODEL_READY};

    fn tensor() -> PixelTensor {
        PixelTensor::new(2, 2, vec![0; 12]).unwrap()
    }

    fn photo(base64: &str) -> CapturedPhoto {
        CapturedPhoto {
            base64: base64.to_string(),
            width: 640,
            height: 480,
        }
    }

    fn predictions() -> Vec<Classification> {
        vec![
            Classification {
                label: "golden retriever".to_string(),
                confidence: 0.87,
            },
            Classification {
                label: "Labrador".to_string(),
                confidence: 0.08,
            },
        ]
    }

    fn live_camera() -> Model {
        let config = Config::default();
        let (model, _) = init();
        let (model, _) = transition(
            &config,
            model,
            Msg::PermissionsDone {
                camera: PermissionStatus::Granted,
                media_library: PermissionStatus::Granted,
            },
        );
        model
    }

    fn press(button: Button) -> Msg {
        Msg::DisplayEvent(DeviceDisplayEvent::Pressed(button))
    }

    fn take_photo(model: Model, base64: &str) -> (Model, Vec<Effect>) {
        transition(
            &Config::default(),
            model,
            Msg::TakePhotoDone(Ok(photo(base64))),
        )
    }

    fn pick(model: Model, uri: &str) -> (Model, Vec<Effect>) {
        transition(
            &Config::default(),
            model,
            Msg::GalleryPickDone(Ok(GalleryPick::Picked {
                uri: uri.to_string(),
            })),
        )
    }

    #[test]
    fn test_init() {
        let (model, effects) = init();

        assert_eq!(model.screen, Screen::PermissionGate);
        assert_eq!(model.pipeline, PipelineState::Idle);
        assert_eq!(model.permissions.camera, PermissionState::Unknown);
        assert_eq!(
            effects,
            vec![Effect::SubscribeToDisplayEvents, Effect::RequestPermissions]
        );
    }

    #[test]
    fn test_permissions_granted_opens_live_camera() {
        let model = live_camera();

        assert_eq!(model.screen, Screen::LiveCamera);
        assert_eq!(model.permissions.camera, PermissionState::Granted);
        assert_eq!(model.permissions.media_library, PermissionState::Granted);
    }

    #[test]
    fn test_camera_permission_denied_blocks_interaction() {
        let config = Config::default();
        let (model, _) = init();

        let (model, effects) = transition(
            &config,
            model,
            Msg::PermissionsDone {
                camera: PermissionStatus::Denied,
                media_library: PermissionStatus::Granted,
            },
        );

        assert_eq!(model.screen, Screen::PermissionGate);
        assert_eq!(model.permissions.camera, PermissionState::Denied);
        assert!(matches!(effects.as_slice(), [Effect::LogError(_)]));

        for button in [Button::Gallery, Button::TakePhoto, Button::Back] {
            let (next, effects) = transition(&config, model.clone(), press(button));
            assert_eq!(next, model);
            assert!(effects.is_empty());
        }

        let (next, effects) = take_photo(model.clone(), "/9j/4AAQ");
        assert_eq!(next, model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_buttons_on_live_camera_start_acquisition() {
        let config = Config::default();
        let model = live_camera();

        let (after_gallery, effects) = transition(&config, model.clone(), press(Button::Gallery));
        assert_eq!(after_gallery, model);
        assert_eq!(effects, vec![Effect::PickFromGallery]);

        let (after_photo, effects) = transition(&config, model.clone(), press(Button::TakePhoto));
        assert_eq!(after_photo, model);
        assert_eq!(effects, vec![Effect::TakePhoto]);

        let (after_back, effects) = transition(&config, model.clone(), press(Button::Back));
        assert_eq!(after_back, model);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_take_photo_scenario_shows_top_prediction() {
        let config = Config::default();
        let model = live_camera();
        assert_eq!(model.pipeline, PipelineState::Idle);

        let (model, effects) = take_photo(model, "/9j/4AAQ...");
        assert_eq!(
            model.screen.image_reference(),
            Some(ImageReference::CameraCapture("/9j/4AAQ...".to_string()))
        );
        assert_eq!(
            model.pipeline,
            PipelineState::Loading {
                generation: 1,
                step: LoadingStep::Decoding
            }
        );
        assert_eq!(
            effects,
            vec![Effect::DecodeImage {
                generation: 1,
                base64: "/9j/4AAQ...".to_string()
            }]
        );

        let (model, effects) = transition(
            &config,
            model,
            Msg::DecodeDone {
                generation: 1,
                result: Ok(tensor()),
            },
        );
        assert_eq!(
            effects,
            vec![Effect::ClassifyImage {
                generation: 1,
                tensor: tensor()
            }]
        );

        let (model, effects) = transition(
            &config,
            model,
            Msg::ClassifyDone {
                generation: 1,
                result: Ok(predictions()),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            model.pipeline,
            PipelineState::Ready(ClassificationResult {
                label: "golden retriever".to_string(),
                confidence: 0.87,
            })
        );
        assert_eq!(view(&model).status, "golden retriever (0.870)");
    }

    #[test]
    fn test_gallery_scenario_read_failure_shows_placeholder() {
        let config = Config::default();

        let (model, effects) = pick(live_camera(), "file:///img1.jpg");
        assert_eq!(
            model.screen,
            Screen::GalleryPreview {
                uri: "file:///img1.jpg".to_string()
            }
        );
        assert_eq!(
            model.pipeline,
            PipelineState::Loading {
                generation: 1,
                step: LoadingStep::ReadingFile
            }
        );
        assert_eq!(
            effects,
            vec![Effect::ReadFile {
                generation: 1,
                uri: "file:///img1.jpg".to_string()
            }]
        );

        let error = PipelineError::FileRead("file:///img1.jpg: No such file".to_string());
        let (model, effects) = transition(
            &config,
            model,
            Msg::FileReadDone {
                generation: 1,
                result: Err(error.clone()),
            },
        );

        assert_eq!(model.pipeline, PipelineState::Failed(error.clone()));
        assert_eq!(effects, vec![Effect::LogError(error.to_string())]);
        assert_eq!(view(&model).status, MODEL_READY);
    }

    #[test]
    fn test_gallery_success_reads_decodes_then_classifies() {
        let config = Config::default();

        let (model, _) = pick(live_camera(), "file:///img1.jpg");
        let (model, effects) = transition(
            &config,
            model,
            Msg::FileReadDone {
                generation: 1,
                result: Ok("/9j/AAAA".to_string()),
            },
        );
        assert_eq!(
            model.pipeline,
            PipelineState::Loading {
                generation: 1,
                step: LoadingStep::Decoding
            }
        );
        assert_eq!(
            effects,
            vec![Effect::DecodeImage {
                generation: 1,
                base64: "/9j/AAAA".to_string()
            }]
        );
    }

    #[test]
    fn test_failures_never_reach_ready() {
        let config = Config::default();
        let failures = vec![
            Msg::DecodeDone {
                generation: 1,
                result: Err(PipelineError::Decode("not a jpeg".to_string())),
            },
            Msg::ClassifyDone {
                generation: 1,
                result: Err(PipelineError::Inference("tensor rank".to_string())),
            },
            Msg::ClassifyDone {
                generation: 1,
                result: Err(PipelineError::ModelLoad("no model".to_string())),
            },
            Msg::ClassifyDone {
                generation: 1,
                result: Ok(vec![]),
            },
            Msg::ClassifyDone {
                generation: 1,
                result: Ok(vec![Classification {
                    label: "bogus".to_string(),
                    confidence: 1.5,
                }]),
            },
        ];

        for failure in failures {
            let (model, _) = take_photo(live_camera(), "/9j/4AAQ");
            let model = match failure {
                Msg::ClassifyDone { .. } => {
                    transition(
                        &config,
                        model,
                        Msg::DecodeDone {
                            generation: 1,
                            result: Ok(tensor()),
                        },
                    )
                    .0
                }
                _ => model,
            };

            let (model, effects) = transition(&config, model, failure);

            assert!(matches!(model.pipeline, PipelineState::Failed(_)));
            assert!(matches!(effects.as_slice(), [Effect::LogError(_)]));
            assert_eq!(view(&model).status, MODEL_READY);
        }
    }

    #[test]
    fn test_stale_result_does_not_overwrite_newer_image() {
        let config = Config::default();

        // A: camera capture, decoded and classifying
        let (model, _) = take_photo(live_camera(), "AAAA");
        let (model, _) = transition(
            &config,
            model,
            Msg::DecodeDone {
                generation: 1,
                result: Ok(tensor()),
            },
        );

        // B: gallery pick before A resolves
        let (model, _) = pick(model, "file:///img2.jpg");
        assert_eq!(model.generation, 2);

        // A resolves late, successfully
        let (after_a, effects) = transition(
            &config,
            model.clone(),
            Msg::ClassifyDone {
                generation: 1,
                result: Ok(predictions()),
            },
        );
        assert_eq!(after_a, model);
        assert!(matches!(effects.as_slice(), [Effect::LogInfo(_)]));

        // A resolves late, with a failure
        let (after_a, _) = transition(
            &config,
            model.clone(),
            Msg::ClassifyDone {
                generation: 1,
                result: Err(PipelineError::Inference("late".to_string())),
            },
        );
        assert_eq!(after_a, model);

        // Only B decides the outcome
        let (model, _) = transition(
            &config,
            model,
            Msg::FileReadDone {
                generation: 2,
                result: Ok("BBBB".to_string()),
            },
        );
        let (model, _) = transition(
            &config,
            model,
            Msg::DecodeDone {
                generation: 2,
                result: Ok(tensor()),
            },
        );
        let (model, _) = transition(
            &config,
            model,
            Msg::ClassifyDone {
                generation: 2,
                result: Ok(vec![Classification {
                    label: "tabby".to_string(),
                    confidence: 0.6,
                }]),
            },
        );
        assert_eq!(
            model.pipeline,
            PipelineState::Ready(ClassificationResult {
                label: "tabby".to_string(),
                confidence: 0.6,
            })
        );
    }

    #[test]
    fn test_stale_intermediate_step_stops_the_chain() {
        let config = Config::default();

        let (model, _) = pick(live_camera(), "file:///img1.jpg");
        let (model, _) = take_photo(model, "CCCC");

        let (after, effects) = transition(
            &config,
            model.clone(),
            Msg::FileReadDone {
                generation: 1,
                result: Ok("AAAA".to_string()),
            },
        );

        assert_eq!(after, model);
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::DecodeImage { .. })));
    }

    #[test]
    fn test_back_clears_image_and_discards_in_flight_result() {
        let config = Config::default();

        let (model, _) = take_photo(live_camera(), "AAAA");
        let (model, effects) = transition(&config, model, press(Button::Back));

        assert_eq!(model.screen, Screen::LiveCamera);
        assert_eq!(model.screen.image_reference(), None);
        assert_eq!(model.pipeline, PipelineState::Idle);
        assert!(effects.is_empty());

        let (after, _) = transition(
            &config,
            model.clone(),
            Msg::DecodeDone {
                generation: 1,
                result: Ok(tensor()),
            },
        );
        assert_eq!(after, model);
    }

    #[test]
    fn test_back_from_ready_returns_to_idle() {
        let config = Config::default();

        let (model, _) = take_photo(live_camera(), "AAAA");
        let (model, _) = transition(
            &config,
            model,
            Msg::DecodeDone {
                generation: 1,
                result: Ok(tensor()),
            },
        );
        let (model, _) = transition(
            &config,
            model,
            Msg::ClassifyDone {
                generation: 1,
                result: Ok(predictions()),
            },
        );
        let (model, _) = transition(&config, model, press(Button::Back));

        assert_eq!(model.screen, Screen::LiveCamera);
        assert_eq!(model.pipeline, PipelineState::Idle);
        assert_eq!(view(&model).status, MODEL_READY);
    }

    #[test]
    fn test_gallery_cancel_is_a_no_op() {
        let config = Config::default();

        for model in [
            live_camera(),
            take_photo(live_camera(), "AAAA").0,
            {
                let (model, _) = take_photo(live_camera(), "AAAA");
                let (model, _) = transition(
                    &config,
                    model,
                    Msg::DecodeDone {
                        generation: 1,
                        result: Err(PipelineError::Decode("bad".to_string())),
                    },
                );
                model
            },
        ] {
            let (after, effects) = transition(
                &config,
                model.clone(),
                Msg::GalleryPickDone(Ok(GalleryPick::Cancelled)),
            );

            assert_eq!(after, model);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_gallery_picker_failure_is_logged_and_ignored() {
        let config = Config::default();
        let model = live_camera();

        let (after, effects) = transition(
            &config,
            model.clone(),
            Msg::GalleryPickDone(Err(PipelineError::Gallery("dialog crashed".to_string()))),
        );

        assert_eq!(after, model);
        assert!(matches!(effects.as_slice(), [Effect::LogError(_)]));
    }

    #[test]
    fn test_capture_failure_keeps_live_camera() {
        let config = Config::default();
        let model = live_camera();

        let (after, effects) = transition(
            &config,
            model.clone(),
            Msg::TakePhotoDone(Err(PipelineError::Capture("no camera handle".to_string()))),
        );

        assert_eq!(after, model);
        assert_eq!(after.screen, Screen::LiveCamera);
        assert_eq!(
            effects,
            vec![Effect::LogError(
                "Camera capture failed: no camera handle".to_string()
            )]
        );
    }

    #[test]
    fn test_generation_increases_monotonically() {
        let config = Config::default();

        let (model, _) = take_photo(live_camera(), "AAAA");
        assert_eq!(model.generation, 1);
        let (model, _) = transition(&config, model, press(Button::Back));
        assert_eq!(model.generation, 2);
        let (model, _) = pick(model, "file:///img1.jpg");
        assert_eq!(model.generation, 3);
        let (model, _) = take_photo(model, "BBBB");
        assert_eq!(model.generation, 4);
        assert_eq!(
            model.screen,
            Screen::PhotoPreview {
                base64: "BBBB".to_string()
            }
        );
    }
}
