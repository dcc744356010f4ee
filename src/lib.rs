#[macro_use]
pub mod parser;
pub mod writer;

pub mod core;
pub mod junction;
pub mod lane;
pub mod road;

pub mod assemble;
pub mod compiler;
pub mod geom;
pub mod network;

#[cfg(test)]
mod tests {
    use crate::core::OpenDrive;
    use crate::lane::lane_type::LaneType;
    use crate::road::geometry::GeometryType;

    #[test]
    pub fn test_minimal_document() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7" name="" version="1.00" date="Tue Feb 25 13:02:27 2020">
                    </header>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        assert_eq!(drive.header.rev_major, 1);
        assert_eq!(drive.header.rev_minor, 7);
        assert!(drive.road.is_empty());
        assert!(drive.junction.is_empty());
    }

    #[test]
    pub fn test_road_with_all_geometry_variants() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7"/>
                    <road name="" length="4.0" id="1" junction="-1">
                        <planView>
                            <geometry s="0.0" x="0.0" y="0.0" hdg="0.0" length="1.0">
                                <line/>
                            </geometry>
                            <geometry s="1.0" x="1.0" y="0.0" hdg="0.0" length="1.0">
                                <arc curvature="0.01"/>
                            </geometry>
                            <geometry s="2.0" x="2.0" y="0.0" hdg="0.0" length="1.0">
                                <spiral curvStart="0.0" curvEnd="0.02"/>
                            </geometry>
                            <geometry s="3.0" x="3.0" y="0.0" hdg="0.0" length="1.0">
                                <paramPoly3 aU="0" bU="1" cU="0" dU="0" aV="0" bV="0" cV="0" dV="0" pRange="arcLength"/>
                            </geometry>
                        </planView>
                        <lanes>
                            <laneSection s="0.0">
                                <center>
                                    <lane id="0" type="driving" level="false"/>
                                </center>
                            </laneSection>
                        </lanes>
                    </road>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        let road = &drive.road[0];
        assert_eq!(road.plan_view.geometry.len(), 4);
        assert!(matches!(road.plan_view.geometry[0].choice, GeometryType::Line(_)));
        assert!(matches!(road.plan_view.geometry[1].choice, GeometryType::Arc(_)));
        assert!(matches!(road.plan_view.geometry[2].choice, GeometryType::Spiral(_)));
        assert!(matches!(
            road.plan_view.geometry[3].choice,
            GeometryType::ParamPoly3(_)
        ));
    }

    #[test]
    pub fn test_geometry_without_variant_is_rejected() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7"/>
                    <road name="" length="1.0" id="1" junction="-1">
                        <planView>
                            <geometry s="0.0" x="0.0" y="0.0" hdg="0.0" length="1.0">
                            </geometry>
                        </planView>
                        <lanes>
                            <laneSection s="0.0">
                            </laneSection>
                        </lanes>
                    </road>
                </OpenDRIVE>
            "#;
        assert!(OpenDrive::from_xml_str(source).is_err());
    }

    #[test]
    pub fn test_malformed_xml_is_rejected() {
        assert!(OpenDrive::from_xml_str("<OpenDRIVE><road").is_err());
    }

    #[test]
    pub fn test_lane_parsing_with_width_rule() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7"/>
                    <road name="" length="100.0" id="1" junction="-1">
                        <link>
                            <successor elementType="junction" elementId="7"/>
                        </link>
                        <type s="0.0" type="motorway">
                            <speed max="90" unit="kmh"/>
                        </type>
                        <planView>
                            <geometry s="0.0" x="0.0" y="0.0" hdg="0.0" length="100.0">
                                <line/>
                            </geometry>
                        </planView>
                        <lanes>
                            <laneSection s="0.0">
                                <left>
                                    <lane id="1" type="driving" level="false">
                                        <width sOffset="0.0" a="0.0" b="0.0" c="0.0" d="0.0"/>
                                        <width sOffset="10.0" a="3.25" b="0.0" c="0.0" d="0.0"/>
                                    </lane>
                                </left>
                                <center>
                                    <lane id="0" type="driving" level="false"/>
                                </center>
                                <right>
                                    <lane id="-1" type="driving" level="false">
                                        <link>
                                            <successor id="-2"/>
                                        </link>
                                        <width sOffset="0.0" a="3.66" b="0.0" c="0.0" d="0.0"/>
                                    </lane>
                                    <lane id="-2" type="sidewalk" level="false">
                                        <width sOffset="0.0" a="2.0" b="0.0" c="0.0" d="0.0"/>
                                    </lane>
                                </right>
                            </laneSection>
                        </lanes>
                    </road>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        let road = &drive.road[0];

        // 90 km/h normalized to m/s.
        assert!((road.speed_limit_mps() - 25.0).abs() < 1e-9);
        assert_eq!(road.road_type(), "motorway");
        assert_eq!(
            road.successor().and_then(|l| l.junction_id()),
            Some("7")
        );

        let section = road.lanes.section_zero();
        let left = &section.left.as_ref().unwrap().lane;
        // The first width entry is degenerate, the second one counts.
        assert!((left.first().base.width_m() - 3.25).abs() < 1e-9);

        let right = &section.right.as_ref().unwrap().lane;
        assert_eq!(right[0].base.successor_id(), Some(-2));
        assert_eq!(right[1].base.r#type, LaneType::Sidewalk);
    }

    #[test]
    pub fn test_junction_parsing() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7"/>
                    <junction id="7" name="crossing">
                        <connection id="0" incomingRoad="1" connectingRoad="5" contactPoint="end">
                            <laneLink from="-1" to="1"/>
                            <laneLink from="-2" to="2"/>
                        </connection>
                    </junction>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        let junction = &drive.junction[0];
        assert_eq!(junction.id, "7");
        let connection = junction.connection.first();
        assert_eq!(connection.incoming_road.as_deref(), Some("1"));
        assert_eq!(connection.connecting_road.as_deref(), Some("5"));
        assert_eq!(
            connection.contact(),
            crate::junction::contact_point::ContactPoint::End
        );
        assert_eq!(connection.lane_link.len(), 2);
        assert_eq!(connection.lane_link[1].from, -2);
        assert_eq!(connection.lane_link[1].to, 2);
    }

    #[test]
    pub fn test_geo_reference_text_is_captured() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7">
                        <geoReference><![CDATA[+proj=utm +zone=32 +datum=WGS84]]></geoReference>
                    </header>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        assert_eq!(
            drive.header.geo_reference.as_deref(),
            Some("+proj=utm +zone=32 +datum=WGS84")
        );
    }

    #[test]
    pub fn test_unknown_elements_are_skipped() {
        let source = r#"
                <?xml version="1.0" standalone="yes"?>
                <OpenDRIVE>
                    <header revMajor="1" revMinor="7"/>
                    <road name="" length="50.0" id="1" junction="-1">
                        <link>
                        </link>
                        <planView>
                            <geometry s="0.0" x="0.0" y="0.0" hdg="0.0" length="50.0">
                                <line/>
                            </geometry>
                        </planView>
                        <elevationProfile>
                            <elevation s="0.0" a="0.0" b="0.0" c="0.0" d="0.0"/>
                        </elevationProfile>
                        <lateralProfile>
                        </lateralProfile>
                        <lanes>
                            <laneSection s="0.0">
                                <center>
                                    <lane id="0" type="none" level="false">
                                        <roadMark sOffset="0.0" type="solid" weight="standard" color="standard" width="0.13"/>
                                    </lane>
                                </center>
                                <right>
                                    <lane id="-1" type="driving" level="false">
                                        <width sOffset="0.0" a="3.5" b="0.0" c="0.0" d="0.0"/>
                                    </lane>
                                </right>
                            </laneSection>
                        </lanes>
                        <objects>
                        </objects>
                        <signals>
                        </signals>
                    </road>
                </OpenDRIVE>
            "#;
        let drive = OpenDrive::from_xml_str(source).unwrap();
        assert_eq!(drive.road.len(), 1);
        let right = drive.road[0].lanes.section_zero().right.as_ref().unwrap();
        assert_eq!(right.lane.len(), 1);
    }
}
