#[cfg(all(test, feature = "derive"))]
mod inner {
    use h5mesh::xdmf::{AttributeType, Center};
    use h5mesh::{
        generate, Components3D, Extent3D, FieldSet, Image3D, MeshData, Scalar3D, Vector3D,
        XmlContainer,
    };

    #[derive(h5mesh::FieldSet)]
    struct Flow {
        pressure: Scalar3D<f32>,
        #[mesh(rename = "velocity")]
        u: Vector3D<f32>,
        #[mesh(center = "cell")]
        vorticity: Scalar3D<f64>,
        #[mesh(skip)]
        #[allow(dead_code)]
        scratch: Vec<u8>,
    }

    #[derive(h5mesh::FieldSet)]
    struct Generic<F> {
        field: F,
    }

    fn extent() -> Extent3D {
        Extent3D::new(5, 4, 3).unwrap()
    }

    fn flow() -> Flow {
        let extent = extent();
        let cells = Extent3D::new(4, 3, 2).unwrap();

        Flow {
            pressure: generate::sin_cos_scalars(&extent),
            u: generate::reciprocal_vectors(&extent),
            vorticity: Scalar3D::from_fn(&cells, |i, j, k| (i + j + k) as f64),
            scratch: vec![1, 2, 3],
        }
    }

    #[test]
    fn attributes_follow_field_options() {
        let mut container = XmlContainer::new();
        let attributes = flow().write_fields(&mut container, &extent()).unwrap();

        let summary: Vec<_> = attributes
            .iter()
            .map(|att| (att.name.as_str(), att.kind, att.center))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("pressure", AttributeType::Scalar, Center::Node),
                ("velocity", AttributeType::Vector, Center::Node),
                ("vorticity", AttributeType::Scalar, Center::Cell),
            ]
        );

        assert_eq!(
            container.names().collect::<Vec<_>>(),
            vec!["/pressure", "/velocity", "/vorticity"]
        );
    }

    #[test]
    fn derived_set_in_a_mesh() {
        let mesh = MeshData::new(Image3D::new(extent()), flow());
        let mut container = XmlContainer::new();

        let document = h5mesh::write_mesh(&mut container, "flow", &mesh).unwrap();
        assert_eq!(document.grids[0].attributes.len(), 3);
    }

    #[test]
    fn cell_field_checked_against_grid() {
        let mut flow = flow();
        flow.vorticity = Scalar3D::from_fn(&extent(), |_, _, _| 0.0);

        let mut container = XmlContainer::new();
        assert!(matches!(
            flow.write_fields(&mut container, &extent()),
            Err(h5mesh::Error::FieldShape { .. })
        ));
    }

    #[test]
    fn generic_fields() {
        let set = Generic {
            field: generate::reciprocal_components::<f32>(&extent()),
        };

        let mut container = XmlContainer::new();
        let attributes = set.write_fields(&mut container, &extent()).unwrap();

        assert_eq!(attributes[0].name, "field");
        assert_eq!(
            container.names().collect::<Vec<_>>(),
            vec!["/field_x", "/field_y", "/field_z"]
        );

        let _: &Components3D<f32> = &set.field;
    }
}
